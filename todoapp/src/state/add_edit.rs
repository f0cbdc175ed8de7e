//! State for the add/edit task screen.
//!
//! Holds the draft being edited and decides on save whether the draft is a
//! new task or an update of an existing one.

use std::sync::Arc;

use parking_lot::Mutex;
use todoapp_model::{Task, TaskId, UserMessage};

use crate::dispatch::Dispatcher;
use crate::observable::{Observable, SingleEvent};
use crate::repository::TaskRepository;

/// Bookkeeping that the view never renders directly.
#[derive(Debug, Default)]
struct Draft {
    /// Task being edited; `None` means a new task.
    task_id: Option<TaskId>,
    /// Set after the first successful load so later `start` calls don't
    /// overwrite what the user typed.
    is_data_loaded: bool,
    /// Completion flag of the loaded task, reapplied on save.
    task_completed: bool,
}

struct Inner<R> {
    repository: Arc<R>,
    title: Observable<String>,
    description: Observable<String>,
    loading: Observable<bool>,
    snackbar_message: SingleEvent<UserMessage>,
    task_updated_event: SingleEvent<()>,
    draft: Mutex<Draft>,
}

/// Add/edit screen state.
///
/// The view binds `title` and `description` to its input fields, shows a
/// spinner while `loading` is set, and leaves the screen when
/// `task_updated_event` fires.
pub struct AddEditTaskState<R: TaskRepository> {
    inner: Arc<Inner<R>>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<R: TaskRepository> Clone for AddEditTaskState<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<R: TaskRepository + 'static> AddEditTaskState<R> {
    /// Creates an empty draft for a new task.
    pub fn new(repository: Arc<R>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                title: Observable::new(String::new()),
                description: Observable::new(String::new()),
                loading: Observable::new(false),
                snackbar_message: SingleEvent::new(),
                task_updated_event: SingleEvent::new(),
                draft: Mutex::new(Draft::default()),
            }),
            dispatcher,
        }
    }

    /// Draft title, editable by the view.
    pub fn title(&self) -> &Observable<String> {
        &self.inner.title
    }

    /// Draft description, editable by the view.
    pub fn description(&self) -> &Observable<String> {
        &self.inner.description
    }

    /// True while an existing task is being fetched.
    pub fn loading(&self) -> &Observable<bool> {
        &self.inner.loading
    }

    /// Validation messages.
    pub fn snackbar_message(&self) -> &SingleEvent<UserMessage> {
        &self.inner.snackbar_message
    }

    /// Fires once after a successful save.
    pub fn task_updated_event(&self) -> &SingleEvent<()> {
        &self.inner.task_updated_event
    }

    /// Whether the draft will be saved as a new task.
    pub fn is_new_task(&self) -> bool {
        self.inner.is_new_task()
    }

    /// Whether an existing task has been loaded into the draft.
    pub fn is_data_loaded(&self) -> bool {
        self.inner.draft.lock().is_data_loaded
    }

    /// The id of the task being edited, if any.
    pub fn task_id(&self) -> Option<TaskId> {
        self.inner.draft.lock().task_id.clone()
    }

    /// Populates the draft from the repository when editing an existing task.
    ///
    /// No-op while a load is in flight, for a new task (`None`), or once the
    /// draft has been loaded. A task that cannot be found leaves the draft
    /// untouched.
    pub fn start(&self, task_id: Option<TaskId>) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher
            .dispatch(Box::pin(async move { inner.start(task_id).await }));
    }

    /// Saves the draft, creating or updating depending on
    /// [`is_new_task`](Self::is_new_task).
    ///
    /// A draft with blank title and description is rejected with
    /// [`UserMessage::EmptyTask`].
    pub fn save_task(&self) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher
            .dispatch(Box::pin(async move { inner.save_task().await }));
    }
}

impl<R: TaskRepository> Inner<R> {
    fn is_new_task(&self) -> bool {
        self.draft.lock().task_id.is_none()
    }

    /// Applies the start guards. Returns the id to fetch, with `loading`
    /// already raised, or `None` if there is nothing to do.
    fn begin_load(&self, task_id: Option<TaskId>) -> Option<TaskId> {
        let mut draft = self.draft.lock();
        if self.loading.get() {
            tracing::debug!("task load already in flight, ignoring start");
            return None;
        }
        draft.task_id = task_id;
        if draft.is_data_loaded {
            return None;
        }
        let id = draft.task_id.clone()?;
        self.loading.set(true);
        Some(id)
    }

    async fn start(&self, task_id: Option<TaskId>) {
        let Some(id) = self.begin_load(task_id) else {
            return;
        };

        let result = self.repository.get_task(&id).await;
        self.loading.set(false);

        match result {
            Ok(Some(task)) => self.populate(&task),
            Ok(None) => tracing::debug!(task_id = %id, "task to edit not found"),
            Err(err) => tracing::warn!(task_id = %id, error = %err, "could not load task to edit"),
        }
    }

    fn populate(&self, task: &Task) {
        let mut draft = self.draft.lock();
        self.title.set(task.title.clone());
        self.description.set(task.description.clone());
        draft.task_completed = task.completed;
        draft.is_data_loaded = true;
    }

    async fn save_task(&self) {
        let title = self.title.get();
        let description = self.description.get();
        let (task_id, task_completed) = {
            let draft = self.draft.lock();
            (draft.task_id.clone(), draft.task_completed)
        };

        let candidate = match &task_id {
            Some(id) => Task::with_id(title, description, id.clone()),
            None => Task::new(title, description),
        };
        if candidate.is_empty() {
            self.snackbar_message.emit(UserMessage::EmptyTask);
            return;
        }

        if task_id.is_none() {
            self.create_task(&candidate).await;
        } else {
            self.update_task(&candidate.with_completed(task_completed))
                .await;
        }
    }

    async fn create_task(&self, task: &Task) {
        tracing::debug!(task_id = %task.id, "creating task");
        self.persist(task).await;
    }

    async fn update_task(&self, task: &Task) {
        assert!(
            !self.is_new_task(),
            "update_task called for a new task (id {})",
            task.id
        );
        tracing::debug!(task_id = %task.id, "updating task");
        self.persist(task).await;
    }

    async fn persist(&self, task: &Task) {
        match self.repository.save_task(task).await {
            Ok(()) => self.task_updated_event.call(),
            Err(err) => tracing::warn!(task_id = %task.id, error = %err, "could not save task"),
        }
    }
}
