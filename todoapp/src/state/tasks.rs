//! State for the task list screen.
//!
//! Holds the filtered list and routes list actions (toggle, clear completed,
//! open, add) to the repository or to navigation events. Every mutation is
//! followed by a reload so `items` always reflects the repository.

use std::sync::Arc;

use todoapp_model::{EditResult, Task, TaskId, TasksFilterType, UserMessage};

use crate::dispatch::Dispatcher;
use crate::observable::{Observable, SingleEvent};
use crate::repository::TaskRepository;

struct Inner<R> {
    repository: Arc<R>,
    items: Observable<Vec<Task>>,
    loading: Observable<bool>,
    filter: Observable<TasksFilterType>,
    empty: Observable<bool>,
    loading_error: Observable<bool>,
    snackbar_message: SingleEvent<UserMessage>,
    open_task_event: SingleEvent<TaskId>,
    new_task_event: SingleEvent<()>,
}

/// Task list screen state.
pub struct TasksState<R: TaskRepository> {
    inner: Arc<Inner<R>>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<R: TaskRepository> Clone for TasksState<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<R: TaskRepository + 'static> TasksState<R> {
    /// Creates a list showing all tasks.
    pub fn new(repository: Arc<R>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self::with_filter(repository, dispatcher, TasksFilterType::All)
    }

    /// Creates a list with an initial filter.
    pub fn with_filter(
        repository: Arc<R>,
        dispatcher: Arc<dyn Dispatcher>,
        filter: TasksFilterType,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                items: Observable::new(Vec::new()),
                loading: Observable::new(false),
                filter: Observable::new(filter),
                empty: Observable::new(false),
                loading_error: Observable::new(false),
                snackbar_message: SingleEvent::new(),
                open_task_event: SingleEvent::new(),
                new_task_event: SingleEvent::new(),
            }),
            dispatcher,
        }
    }

    /// Tasks matching the current filter.
    pub fn items(&self) -> &Observable<Vec<Task>> {
        &self.inner.items
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.inner.loading
    }

    pub fn filter(&self) -> &Observable<TasksFilterType> {
        &self.inner.filter
    }

    /// True after a successful load that matched no task.
    pub fn empty(&self) -> &Observable<bool> {
        &self.inner.empty
    }

    /// True when the last load failed.
    pub fn loading_error(&self) -> &Observable<bool> {
        &self.inner.loading_error
    }

    pub fn snackbar_message(&self) -> &SingleEvent<UserMessage> {
        &self.inner.snackbar_message
    }

    /// Carries the id of the task the user chose to open.
    pub fn open_task_event(&self) -> &SingleEvent<TaskId> {
        &self.inner.open_task_event
    }

    pub fn new_task_event(&self) -> &SingleEvent<()> {
        &self.inner.new_task_event
    }

    /// Adding is offered only on the unfiltered list.
    pub fn is_add_visible(&self) -> bool {
        self.inner.filter.get() == TasksFilterType::All
    }

    /// Initial load, served from cache when possible.
    pub fn start(&self) {
        self.load_tasks(false);
    }

    /// Reloads the list. With `force_update` the repository is asked to
    /// refresh its cache first.
    pub fn load_tasks(&self, force_update: bool) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher
            .dispatch(Box::pin(async move { inner.load(force_update).await }));
    }

    /// Switches the filter and reloads.
    pub fn set_filtering(&self, filter: TasksFilterType) {
        tracing::debug!(%filter, "filter changed");
        self.inner.filter.set(filter);
        self.load_tasks(false);
    }

    /// Removes every completed task.
    pub fn clear_completed_tasks(&self) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher.dispatch(Box::pin(async move {
            match inner.repository.clear_completed_tasks().await {
                Ok(()) => inner
                    .snackbar_message
                    .emit(UserMessage::CompletedTasksCleared),
                Err(err) => tracing::warn!(error = %err, "could not clear completed tasks"),
            }
            inner.load(false).await;
        }));
    }

    /// Marks `task` complete or active from the list.
    pub fn complete_task(&self, task: &Task, completed: bool) {
        let inner = Arc::clone(&self.inner);
        let task = task.clone().with_completed(completed);
        self.dispatcher.dispatch(Box::pin(async move {
            let (result, message) = if completed {
                (
                    inner.repository.complete_task(&task).await,
                    UserMessage::TaskMarkedComplete,
                )
            } else {
                (
                    inner.repository.activate_task(&task).await,
                    UserMessage::TaskMarkedActive,
                )
            };
            match result {
                Ok(()) => inner.snackbar_message.emit(message),
                Err(err) => {
                    tracing::warn!(task_id = %task.id, error = %err, "could not change completion");
                }
            }
            inner.load(false).await;
        }));
    }

    /// Requests the add screen.
    pub fn add_new_task(&self) {
        self.inner.new_task_event.call();
    }

    /// Requests the detail screen for `task_id`.
    pub fn open_task(&self, task_id: TaskId) {
        self.inner.open_task_event.emit(task_id);
    }

    /// Reports what happened on the screen the user just left.
    pub fn show_edit_result(&self, result: EditResult) {
        self.inner.snackbar_message.emit(result.into());
    }
}

impl<R: TaskRepository> Inner<R> {
    async fn load(&self, force_update: bool) {
        if force_update {
            self.repository.refresh_tasks().await;
        }

        self.loading.set(true);
        let result = self.repository.get_tasks().await;
        self.loading.set(false);

        match result {
            Ok(tasks) => {
                let filter = self.filter.get();
                let visible: Vec<Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();
                tracing::debug!(%filter, count = visible.len(), "tasks loaded");
                self.empty.set(visible.is_empty());
                self.items.set(visible);
                self.loading_error.set(false);
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load tasks");
                self.loading_error.set(true);
                self.snackbar_message.emit(UserMessage::LoadingTasksError);
            }
        }
    }
}
