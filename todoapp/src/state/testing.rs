//! Recording repository used by the state container unit tests.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use todoapp_model::{Task, TaskId};

use crate::repository::{InMemoryDataSource, RepositoryError, TaskRepository};

/// One repository call, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetTasks,
    GetTask(TaskId),
    SaveTask(Task),
    CompleteTask(Task),
    ActivateTask(Task),
    ClearCompleted,
    DeleteTask(TaskId),
    DeleteAll,
    Refresh,
}

/// In-memory repository that records every call and can be made to fail.
#[derive(Debug, Default)]
pub struct RecordingRepository {
    store: InMemoryDataSource,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            store: InMemoryDataSource::with_tasks(tasks),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn stored(&self, id: &TaskId) -> Option<Task> {
        futures::executor::block_on(self.store.get_task(id)).unwrap_or(None)
    }

    fn record(&self, call: Call) -> Result<(), RepositoryError> {
        self.calls.lock().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Unavailable("test failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl TaskRepository for RecordingRepository {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        self.record(Call::GetTasks)?;
        self.store.get_tasks().await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        self.record(Call::GetTask(id.clone()))?;
        self.store.get_task(id).await
    }

    async fn save_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.record(Call::SaveTask(task.clone()))?;
        self.store.save_task(task).await
    }

    async fn complete_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.record(Call::CompleteTask(task.clone()))?;
        self.store.complete_task(task).await
    }

    async fn activate_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.record(Call::ActivateTask(task.clone()))?;
        self.store.activate_task(task).await
    }

    async fn clear_completed_tasks(&self) -> Result<(), RepositoryError> {
        self.record(Call::ClearCompleted)?;
        self.store.clear_completed_tasks().await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.record(Call::DeleteTask(id.clone()))?;
        self.store.delete_task(id).await
    }

    async fn delete_all_tasks(&self) -> Result<(), RepositoryError> {
        self.record(Call::DeleteAll)?;
        self.store.delete_all_tasks().await
    }

    async fn refresh_tasks(&self) {
        self.calls.lock().push(Call::Refresh);
    }
}
