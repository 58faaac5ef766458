use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::system::snapshot::DisplayFlags;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, flags: &DisplayFlags, theme: &Theme) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit", theme));
    spans.extend(pill_spans("d", toggle_label("Disk usage", flags.show_disk_usage), theme));
    spans.extend(pill_spans("g", toggle_label("GPUs", flags.show_gpus), theme));
    spans.extend(pill_spans("r", "Refresh", theme));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn toggle_label(name: &str, on: bool) -> String {
    format!("{name} {}", if on { "on" } else { "off" })
}

fn pill_spans<'a>(key: &'a str, desc: impl Into<String>, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", desc.into()),
            Style::default().fg(theme.pill_desc_fg),
        ),
    ]
}
