//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use todoapp_model::TasksFilterType;

use super::theme;
use crate::app::App;
use crate::repository::TaskRepository;

/// Render the filtered task list, or a placeholder when there is nothing
/// to show.
pub fn render<R: TaskRepository + 'static>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let tasks = &app.tasks;
    let filter = tasks.filter().get();
    let mut title = vec![Span::styled(
        format!(" Tasks ({filter}) "),
        theme::panel_title(theme::TASKS_TITLE),
    )];
    if tasks.loading().get() {
        title.push(Span::styled("loading… ", theme::normal().fg(theme::WARNING)));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    if tasks.loading_error().get() {
        let text = Line::from(Span::styled(
            "Could not load tasks. Press r to retry.",
            theme::normal().fg(theme::ERROR),
        ));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    if tasks.empty().get() {
        let text = Line::from(Span::styled(empty_text(filter), theme::dimmed()));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let items: Vec<ListItem> = tasks.items().with(|items| {
        items
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let text_style = if task.completed {
                    theme::completed()
                } else {
                    theme::normal()
                };
                let line = Line::from(vec![
                    Span::styled(theme::checkbox(task.completed), theme::normal().fg(theme::DONE)),
                    Span::raw(" "),
                    Span::styled(task.title_for_list().to_string(), text_style),
                ]);
                let item = ListItem::new(line);
                if idx == app.selected {
                    item.style(theme::selected())
                } else {
                    item
                }
            })
            .collect()
    });

    frame.render_widget(List::new(items).block(block), area);
}

const fn empty_text(filter: TasksFilterType) -> &'static str {
    match filter {
        TasksFilterType::All => "You have no tasks! Press a to add one.",
        TasksFilterType::Active => "You have no active tasks!",
        TasksFilterType::Completed => "You have no completed tasks!",
    }
}
