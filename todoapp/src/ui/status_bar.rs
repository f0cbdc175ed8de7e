//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use todoapp_model::UserMessage;

use super::theme;
use crate::app::{App, Screen};
use crate::repository::TaskRepository;

/// Text shown for a message code.
#[must_use]
pub const fn message_text(message: UserMessage) -> &'static str {
    match message {
        UserMessage::EmptyTask => "Tasks cannot be empty",
        UserMessage::TaskMarkedComplete => "Task marked complete",
        UserMessage::TaskMarkedActive => "Task marked active",
        UserMessage::CompletedTasksCleared => "Completed tasks cleared",
        UserMessage::TaskSaved => "Task saved",
        UserMessage::TaskAdded => "Task added",
        UserMessage::TaskDeleted => "Task was deleted",
        UserMessage::LoadingTasksError => "Error while loading tasks",
    }
}

/// Render the status bar at the bottom of the screen.
pub fn render<R: TaskRepository + 'static>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let help_text = match &app.screen {
        Screen::Tasks => {
            "↑↓/jk: select | Enter: open | a: add | Space: toggle | f: filter | c: clear done | r: refresh | s: stats | q: quit"
        }
        Screen::Detail(_) => "e: edit | d: delete | Space: toggle | r: refresh | Esc: back",
        Screen::AddEdit { .. } => "Tab: switch field | Enter: save | Esc: cancel",
        Screen::Statistics(_) => "Esc: back",
    };

    let mut spans = vec![Span::styled("todoapp", theme::bold()), Span::raw(" | ")];
    if let Some(message) = app.status_message {
        let style = if message == UserMessage::LoadingTasksError {
            theme::normal().fg(theme::ERROR)
        } else {
            theme::normal()
        };
        spans.push(Span::styled(message_text(message), style));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
