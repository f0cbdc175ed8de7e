//! Task detail rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::repository::TaskRepository;
use crate::state::TaskDetailState;

/// Render the loaded task, or a loading/missing placeholder.
pub fn render<R: TaskRepository + 'static>(
    frame: &mut Frame,
    area: Rect,
    detail: &TaskDetailState<R>,
) {
    let block = Block::default()
        .title(Span::styled(" Task ", theme::panel_title(theme::DETAIL_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let lines = match detail.task().get() {
        Some(task) => {
            let completed = detail.completed().get();
            vec![
                Line::from(vec![
                    Span::styled(theme::checkbox(completed), theme::normal().fg(theme::DONE)),
                    Span::raw(" "),
                    Span::styled(task.title, theme::bold()),
                ]),
                Line::raw(""),
                Line::from(Span::styled(task.description, theme::normal())),
            ]
        }
        None if detail.loading().get() => {
            vec![Line::from(Span::styled("Loading…", theme::normal().fg(theme::WARNING)))]
        }
        None => vec![Line::from(Span::styled("No data", theme::dimmed()))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
