//! Statistics rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::repository::TaskRepository;
use crate::state::StatisticsState;

pub fn render<R: TaskRepository + 'static>(
    frame: &mut Frame,
    area: Rect,
    stats: &StatisticsState<R>,
) {
    let block = Block::default()
        .title(Span::styled(" Statistics ", theme::panel_title(theme::STATS_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let lines = if stats.loading().get() {
        vec![Line::from(Span::styled("Loading…", theme::normal().fg(theme::WARNING)))]
    } else if stats.loading_error().get() {
        vec![Line::from(Span::styled(
            "Could not load statistics",
            theme::normal().fg(theme::ERROR),
        ))]
    } else if stats.empty().get() {
        vec![Line::from(Span::styled("You have no tasks.", theme::dimmed()))]
    } else {
        vec![
            Line::from(vec![
                Span::styled("Active tasks: ", theme::dimmed()),
                Span::styled(stats.active_count().get().to_string(), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled("Completed tasks: ", theme::dimmed()),
                Span::styled(stats.completed_count().get().to_string(), theme::bold()),
            ]),
        ]
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
