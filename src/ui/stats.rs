use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::truncate_unicode;
use crate::report::{self, LABEL_WIDTH, TITLE};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(theme.text_primary);
    let identity = report::identity(snapshot);
    // label column, the space after it, and a one-cell right margin
    let value_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 2);

    let mut lines = vec![
        Line::styled(TITLE, accent).centered(),
        Line::styled(
            truncate_unicode(&identity, area.width as usize),
            Style::default().fg(theme.accent),
        ),
        Line::styled(
            "-".repeat(identity.chars().count().min(area.width as usize)),
            Style::default().fg(theme.text_secondary),
        ),
    ];

    for stat in report::stat_lines(snapshot) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<LABEL_WIDTH$} ", format!("{}:", stat.label)), accent),
            Span::styled(truncate_unicode(&stat.value, value_width), value_style),
        ]));
    }

    let top_pad = (area.height as usize).saturating_sub(lines.len()) / 2;
    let mut padded: Vec<Line> = std::iter::repeat_n(Line::raw(""), top_pad).collect();
    padded.extend(lines);

    frame.render_widget(Paragraph::new(padded), area);
}
