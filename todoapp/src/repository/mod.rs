//! Task storage abstraction.
//!
//! Defines the [`TaskRepository`] trait that state containers talk to.
//! Implementations:
//! - [`memory::InMemoryDataSource`]: local in-process store
//! - [`remote::FakeRemoteDataSource`]: simulated remote store with latency
//! - [`cached::CachedRepository`]: in-memory cache over a local and a
//!   remote source

pub mod cached;
pub mod memory;
pub mod remote;

pub use cached::CachedRepository;
pub use memory::InMemoryDataSource;
pub use remote::FakeRemoteDataSource;

use todoapp_model::{Task, TaskId};

/// Errors that can occur during repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Async CRUD access to tasks.
///
/// A missing task is not an error for [`get_task`](Self::get_task): it
/// returns `Ok(None)`. Errors are reserved for storage failures and for
/// operations that need an existing task.
pub trait TaskRepository: Send + Sync {
    /// Return every stored task in id order.
    fn get_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, RepositoryError>> + Send;

    /// Look up a single task.
    fn get_task(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Option<Task>, RepositoryError>> + Send;

    /// Create or overwrite a task, keyed by its id.
    fn save_task(
        &self,
        task: &Task,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Mark a task completed.
    fn complete_task(
        &self,
        task: &Task,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Mark a task active.
    fn activate_task(
        &self,
        task: &Task,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove every completed task.
    fn clear_completed_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove one task. Removing a missing task is not an error.
    fn delete_task(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove every task.
    fn delete_all_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Invalidate cached data so the next read goes to the source of truth.
    ///
    /// Plain data sources have nothing to invalidate.
    fn refresh_tasks(&self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}
