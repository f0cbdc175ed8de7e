//! Add/edit form rendering (title input + description input).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::app::EditField;
use crate::repository::TaskRepository;
use crate::state::AddEditTaskState;

/// Render the draft with the focused field highlighted.
pub fn render<R: TaskRepository + 'static>(
    frame: &mut Frame,
    area: Rect,
    state: &AddEditTaskState<R>,
    focus: EditField,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let heading = if state.is_new_task() { "New task" } else { "Edit task" };
    let loading = state.loading().get();

    render_input(
        frame,
        chunks[0],
        &format!(" {heading}: title "),
        &state.title().get(),
        focus == EditField::Title && !loading,
    );
    render_input(
        frame,
        chunks[1],
        " Description ",
        &state.description().get(),
        focus == EditField::Description && !loading,
    );
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, text: &str, is_focused: bool) {
    let mut display_text = text.to_string();
    if is_focused {
        display_text.push('█');
    }

    let block = Block::default()
        .title(Span::styled(title.to_string(), theme::panel_title(theme::DETAIL_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let paragraph = Paragraph::new(Line::from(Span::styled(display_text, theme::normal())))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
