pub mod orb_widget;
pub mod stats;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::orb::ORB_WIDTH;

pub fn draw(frame: &mut Frame, app: &App) {
    let [body, bar] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    let [orb_area, stats_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ORB_WIDTH as u16 + 2), Constraint::Min(20)])
        .areas(body);

    orb_widget::render(frame, orb_area, app.orb.current(), &app.theme);
    stats::render(frame, stats_area, &app.snapshot, &app.theme);
    statusbar::render(frame, bar, &app.snapshot.flags, &app.theme);
}
