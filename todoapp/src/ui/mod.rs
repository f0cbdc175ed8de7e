//! Terminal UI rendering.

pub mod detail_panel;
pub mod edit_panel;
pub mod statistics_panel;
pub mod status_bar;
pub mod tasks_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{App, Screen};
use crate::repository::TaskRepository;

/// Main draw function for the entire UI.
pub fn draw<R: TaskRepository + 'static>(frame: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = chunks[0];
    let status_area = chunks[1];

    match &app.screen {
        Screen::Tasks => tasks_panel::render(frame, content_area, app),
        Screen::Detail(detail) => detail_panel::render(frame, content_area, detail),
        Screen::AddEdit { state, focus } => edit_panel::render(frame, content_area, state, *focus),
        Screen::Statistics(stats) => statistics_panel::render(frame, content_area, stats),
    }

    status_bar::render(frame, status_area, app);
}
