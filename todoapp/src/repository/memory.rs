//! In-process task store.
//!
//! Tasks live in a `BTreeMap` keyed by [`TaskId`]; since fresh ids are
//! UUID v7, iteration order follows creation order.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use todoapp_model::{Task, TaskId};

use super::{RepositoryError, TaskRepository};

/// Local task store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryDataSource {
    tasks: Mutex<BTreeMap<TaskId, Task>>,
}

impl InMemoryDataSource {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let map = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            tasks: Mutex::new(map),
        }
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Sets the completion flag of a stored task.
    fn set_completed(&self, id: &TaskId, completed: bool) -> Result<(), RepositoryError> {
        let mut tasks = self.tasks.lock();
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        task.completed = completed;
        Ok(())
    }
}

impl TaskRepository for InMemoryDataSource {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(self.tasks.lock().values().cloned().collect())
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        Ok(self.tasks.lock().get(id).cloned())
    }

    async fn save_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.tasks.lock().insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn complete_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.set_completed(&task.id, true)
    }

    async fn activate_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.set_completed(&task.id, false)
    }

    async fn clear_completed_tasks(&self) -> Result<(), RepositoryError> {
        self.tasks.lock().retain(|_, t| !t.completed);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.tasks.lock().remove(id);
        Ok(())
    }

    async fn delete_all_tasks(&self) -> Result<(), RepositoryError> {
        self.tasks.lock().clear();
        Ok(())
    }
}
