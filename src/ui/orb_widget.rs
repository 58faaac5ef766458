use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

/// Draws one orb frame, vertically centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, orb: &[String], theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let style = Style::default().fg(theme.orb);
    let top_pad = (area.height as usize).saturating_sub(orb.len()) / 2;
    let mut lines: Vec<Line> = std::iter::repeat_n(Line::raw(""), top_pad).collect();
    lines.extend(orb.iter().map(|row| Line::styled(format!(" {row}"), style)));

    frame.render_widget(Paragraph::new(lines), area);
}
