//! State for the task detail screen.

use std::sync::Arc;

use todoapp_model::{Task, TaskId, UserMessage};

use crate::dispatch::Dispatcher;
use crate::observable::{Observable, SingleEvent};
use crate::repository::TaskRepository;

struct Inner<R> {
    repository: Arc<R>,
    task: Observable<Option<Task>>,
    completed: Observable<bool>,
    loading: Observable<bool>,
    edit_task_command: SingleEvent<()>,
    delete_task_command: SingleEvent<()>,
    snackbar_message: SingleEvent<UserMessage>,
}

/// Detail screen state: shows one task and lets the user toggle, edit or
/// delete it.
pub struct TaskDetailState<R: TaskRepository> {
    inner: Arc<Inner<R>>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<R: TaskRepository> Clone for TaskDetailState<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<R: TaskRepository + 'static> TaskDetailState<R> {
    pub fn new(repository: Arc<R>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                task: Observable::new(None),
                completed: Observable::new(false),
                loading: Observable::new(false),
                edit_task_command: SingleEvent::new(),
                delete_task_command: SingleEvent::new(),
                snackbar_message: SingleEvent::new(),
            }),
            dispatcher,
        }
    }

    /// The displayed task, absent until loaded or when not found.
    pub fn task(&self) -> &Observable<Option<Task>> {
        &self.inner.task
    }

    /// Mirror of the loaded task's completion flag.
    pub fn completed(&self) -> &Observable<bool> {
        &self.inner.completed
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.inner.loading
    }

    /// Asks the view to open the editor for the current task.
    pub fn edit_task_command(&self) -> &SingleEvent<()> {
        &self.inner.edit_task_command
    }

    /// Fires after the current task was deleted.
    pub fn delete_task_command(&self) -> &SingleEvent<()> {
        &self.inner.delete_task_command
    }

    pub fn snackbar_message(&self) -> &SingleEvent<UserMessage> {
        &self.inner.snackbar_message
    }

    /// Whether a task is loaded.
    pub fn is_data_available(&self) -> bool {
        self.inner.task.with(Option::is_some)
    }

    /// Loads the task with `task_id`. `None` does nothing.
    pub fn start(&self, task_id: Option<TaskId>) {
        let Some(id) = task_id else {
            return;
        };
        let inner = Arc::clone(&self.inner);
        self.dispatcher
            .dispatch(Box::pin(async move { inner.load(&id).await }));
    }

    /// Deletes the loaded task, then fires `delete_task_command`.
    pub fn delete_task(&self) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher
            .dispatch(Box::pin(async move { inner.delete_task().await }));
    }

    /// Requests the editor. Fires even when no task is loaded.
    pub fn edit_task(&self) {
        self.inner.edit_task_command.call();
    }

    /// Marks the loaded task complete or active.
    ///
    /// Ignored while loading and when no task is loaded.
    pub fn set_completed(&self, completed: bool) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher.dispatch(Box::pin(async move {
            inner.set_completed(completed).await;
        }));
    }

    /// Reloads the current task, if there is one.
    pub fn on_refresh(&self) {
        let id = self.inner.task.with(|t| t.as_ref().map(|t| t.id.clone()));
        if id.is_some() {
            self.start(id);
        }
    }
}

impl<R: TaskRepository> Inner<R> {
    async fn load(&self, id: &TaskId) {
        self.loading.set(true);
        let result = self.repository.get_task(id).await;
        self.loading.set(false);

        let task = result.unwrap_or_else(|err| {
            tracing::warn!(task_id = %id, error = %err, "could not load task");
            None
        });
        if let Some(task) = &task {
            self.completed.set(task.completed);
        } else {
            tracing::debug!(task_id = %id, "task not found");
        }
        self.task.set(task);
    }

    async fn delete_task(&self) {
        let Some(id) = self.task.with(|t| t.as_ref().map(|t| t.id.clone())) else {
            return;
        };
        match self.repository.delete_task(&id).await {
            Ok(()) => self.delete_task_command.call(),
            Err(err) => tracing::warn!(task_id = %id, error = %err, "could not delete task"),
        }
    }

    async fn set_completed(&self, completed: bool) {
        if self.loading.get() {
            return;
        }
        let Some(task) = self.task.get() else {
            tracing::debug!("no task loaded, ignoring completion change");
            return;
        };

        let updated = task.clone().with_completed(completed);
        self.task.set(Some(updated.clone()));
        self.completed.set(completed);

        let (result, message) = if completed {
            (
                self.repository.complete_task(&updated).await,
                UserMessage::TaskMarkedComplete,
            )
        } else {
            (
                self.repository.activate_task(&updated).await,
                UserMessage::TaskMarkedActive,
            )
        };

        match result {
            Ok(()) => self.snackbar_message.emit(message),
            Err(err) => {
                tracing::warn!(task_id = %task.id, error = %err, "could not change completion");
                self.completed.set(task.completed);
                self.task.set(Some(task));
            }
        }
    }
}
