//! Application state and event handling.
//!
//! [`App`] owns the task list state for the whole session and one state
//! container for whichever other screen is open. Key presses are routed to
//! the current screen's container; [`App::tick`] drains the containers'
//! one-shot events and turns them into screen changes and status messages.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todoapp_model::{EditResult, Task, TaskId, TasksFilterType, UserMessage};

use crate::dispatch::Dispatcher;
use crate::repository::TaskRepository;
use crate::state::{AddEditTaskState, StatisticsState, TaskDetailState, TasksState};

/// Which add/edit input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
}

impl EditField {
    const fn toggle(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Title,
        }
    }
}

/// The screen currently shown.
pub enum Screen<R: TaskRepository> {
    /// The task list, backed by [`App::tasks`].
    Tasks,
    /// One task's details.
    Detail(TaskDetailState<R>),
    /// Adding a new task or editing an existing one.
    AddEdit {
        /// Draft state.
        state: AddEditTaskState<R>,
        /// Focused input.
        focus: EditField,
    },
    /// Active/completed counts.
    Statistics(StatisticsState<R>),
}

/// Main application state.
pub struct App<R: TaskRepository> {
    repository: Arc<R>,
    dispatcher: Arc<dyn Dispatcher>,
    /// Task list state; lives for the whole session.
    pub tasks: TasksState<R>,
    /// Screen on top of the list, if any.
    pub screen: Screen<R>,
    /// Selected row in the task list.
    pub selected: usize,
    /// Last message shown in the status bar.
    pub status_message: Option<UserMessage>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<R: TaskRepository + 'static> App<R> {
    /// Creates the app on the task list screen. Call [`start`](Self::start)
    /// to trigger the first load.
    pub fn new(
        repository: Arc<R>,
        dispatcher: Arc<dyn Dispatcher>,
        filter: TasksFilterType,
    ) -> Self {
        let tasks = TasksState::with_filter(Arc::clone(&repository), Arc::clone(&dispatcher), filter);
        Self {
            repository,
            dispatcher,
            tasks,
            screen: Screen::Tasks,
            selected: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Loads the task list.
    pub fn start(&self) {
        self.tasks.start();
    }

    /// The task under the list cursor.
    pub fn selected_task(&self) -> Option<Task> {
        self.tasks.items().with(|items| items.get(self.selected).cloned())
    }

    /// Drains pending one-shot events from every live container.
    pub fn tick(&mut self) {
        self.drain_screen_events();
        self.drain_list_events();

        let len = self.tasks.items().with(Vec::len);
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn drain_screen_events(&mut self) {
        let mut next = None;
        match &self.screen {
            Screen::Tasks | Screen::Statistics(_) => {}
            Screen::Detail(detail) => {
                if let Some(message) = detail.snackbar_message().take() {
                    self.status_message = Some(message);
                }
                if detail.delete_task_command().take().is_some() {
                    next = Some(Navigation::BackToList(Some(EditResult::Deleted)));
                } else if detail.edit_task_command().take().is_some() {
                    let id = detail.task().with(|t| t.as_ref().map(|t| t.id.clone()));
                    if id.is_some() {
                        next = Some(Navigation::Edit(id));
                    }
                }
            }
            Screen::AddEdit { state, .. } => {
                if let Some(message) = state.snackbar_message().take() {
                    self.status_message = Some(message);
                }
                if state.task_updated_event().take().is_some() {
                    let result = if state.is_new_task() {
                        EditResult::Added
                    } else {
                        EditResult::Saved
                    };
                    next = Some(Navigation::BackToList(Some(result)));
                }
            }
        }
        if let Some(nav) = next {
            self.navigate(nav);
        }
    }

    fn drain_list_events(&mut self) {
        if let Some(id) = self.tasks.open_task_event().take() {
            self.navigate(Navigation::Detail(id));
        }
        if self.tasks.new_task_event().take().is_some() {
            self.navigate(Navigation::Edit(None));
        }
        if let Some(message) = self.tasks.snackbar_message().take() {
            self.status_message = Some(message);
        }
    }

    fn navigate(&mut self, nav: Navigation) {
        match nav {
            Navigation::Detail(id) => {
                tracing::debug!(task_id = %id, "opening task");
                let detail = TaskDetailState::new(
                    Arc::clone(&self.repository),
                    Arc::clone(&self.dispatcher),
                );
                detail.start(Some(id));
                self.screen = Screen::Detail(detail);
            }
            Navigation::Edit(id) => {
                let state = AddEditTaskState::new(
                    Arc::clone(&self.repository),
                    Arc::clone(&self.dispatcher),
                );
                state.start(id);
                self.screen = Screen::AddEdit {
                    state,
                    focus: EditField::Title,
                };
            }
            Navigation::Statistics => {
                let stats = StatisticsState::new(
                    Arc::clone(&self.repository),
                    Arc::clone(&self.dispatcher),
                );
                stats.start();
                self.screen = Screen::Statistics(stats);
            }
            Navigation::BackToList(result) => {
                self.screen = Screen::Tasks;
                if let Some(result) = result {
                    self.tasks.show_edit_result(result);
                }
                self.tasks.load_tasks(false);
            }
        }
    }

    /// Handles a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if matches!(self.screen, Screen::Tasks) {
            self.handle_list_key(key);
            return;
        }

        let mut back = false;
        match &mut self.screen {
            Screen::Tasks => {}
            Screen::Detail(detail) => match key.code {
                KeyCode::Char('e') => detail.edit_task(),
                KeyCode::Char('d') => detail.delete_task(),
                KeyCode::Char(' ') => detail.set_completed(!detail.completed().get()),
                KeyCode::Char('r') => detail.on_refresh(),
                KeyCode::Esc => back = true,
                _ => {}
            },
            Screen::AddEdit { state, focus } => {
                let field = match focus {
                    EditField::Title => state.title(),
                    EditField::Description => state.description(),
                };
                match key.code {
                    KeyCode::Char(c) => field.update(|text| text.push(c)),
                    KeyCode::Backspace => field.update(|text| {
                        text.pop();
                    }),
                    KeyCode::Tab | KeyCode::BackTab => *focus = focus.toggle(),
                    KeyCode::Enter => state.save_task(),
                    KeyCode::Esc => back = true,
                    _ => {}
                }
            }
            Screen::Statistics(_) => back = matches!(key.code, KeyCode::Esc | KeyCode::Char('q')),
        }
        if back {
            self.navigate(Navigation::BackToList(None));
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.tasks.items().with(Vec::len);
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.tasks.open_task(task.id);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(task) = self.selected_task() {
                    self.tasks.complete_task(&task, !task.completed);
                }
            }
            KeyCode::Char('a') => {
                if self.tasks.is_add_visible() {
                    self.tasks.add_new_task();
                }
            }
            KeyCode::Char('f') => {
                self.selected = 0;
                self.tasks.set_filtering(self.tasks.filter().get().next());
            }
            KeyCode::Char('c') => self.tasks.clear_completed_tasks(),
            KeyCode::Char('r') => self.tasks.load_tasks(true),
            KeyCode::Char('s') => self.navigate(Navigation::Statistics),
            _ => {}
        }
    }
}

/// Screen change requested by an event or key.
enum Navigation {
    Detail(TaskId),
    Edit(Option<TaskId>),
    Statistics,
    BackToList(Option<EditResult>),
}
