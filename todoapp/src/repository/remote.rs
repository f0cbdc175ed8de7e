//! Simulated remote task store.
//!
//! Behaves like a slow server: every call waits for a configurable latency
//! before touching an in-process map. The store can be switched offline so
//! callers can exercise their failure paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use todoapp_model::{Task, TaskId};

use super::memory::InMemoryDataSource;
use super::{RepositoryError, TaskRepository};

/// Remote stand-in with artificial latency.
#[derive(Debug)]
pub struct FakeRemoteDataSource {
    store: InMemoryDataSource,
    latency: Duration,
    available: AtomicBool,
}

impl FakeRemoteDataSource {
    /// Creates an empty remote with the given per-call latency.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            store: InMemoryDataSource::new(),
            latency,
            available: AtomicBool::new(true),
        }
    }

    /// Creates a remote that already holds two demo tasks.
    #[must_use]
    pub fn with_demo_tasks(latency: Duration) -> Self {
        Self {
            store: InMemoryDataSource::with_tasks([
                Task::new(
                    "Build tower in Pisa",
                    "Ground looks good, no foundation work required.",
                ),
                Task::new("Finish bridge in Tacoma", "Found awesome girders at half the cost!"),
            ]),
            latency,
            available: AtomicBool::new(true),
        }
    }

    /// Simulates the remote going offline (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Waits out the simulated latency, then checks availability.
    async fn round_trip(&self) -> Result<(), RepositoryError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            tracing::debug!("remote data source offline");
            Err(RepositoryError::Unavailable("remote offline".to_string()))
        }
    }
}

impl TaskRepository for FakeRemoteDataSource {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        self.round_trip().await?;
        self.store.get_tasks().await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        self.round_trip().await?;
        self.store.get_task(id).await
    }

    async fn save_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.round_trip().await?;
        self.store.save_task(task).await
    }

    async fn complete_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.round_trip().await?;
        self.store.complete_task(task).await
    }

    async fn activate_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.round_trip().await?;
        self.store.activate_task(task).await
    }

    async fn clear_completed_tasks(&self) -> Result<(), RepositoryError> {
        self.round_trip().await?;
        self.store.clear_completed_tasks().await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.round_trip().await?;
        self.store.delete_task(id).await
    }

    async fn delete_all_tasks(&self) -> Result<(), RepositoryError> {
        self.round_trip().await?;
        self.store.delete_all_tasks().await
    }
}
