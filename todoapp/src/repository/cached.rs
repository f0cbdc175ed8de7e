//! Cached repository over a local and a remote data source.
//!
//! Reads are served from an in-memory cache once it has been filled. The
//! cache is filled from the local source, falling back to the remote source
//! when the local one is empty or failing. [`refresh_tasks`] marks the cache
//! dirty so the next [`get_tasks`] goes straight to the remote and rewrites
//! the local copy. A single task found only on the remote is copied into the
//! local source as well as the cache.
//!
//! Writes go to the remote first, then the local source, then the cache. A
//! remote failure aborts the write before anything local changes.
//!
//! [`refresh_tasks`]: TaskRepository::refresh_tasks
//! [`get_tasks`]: TaskRepository::get_tasks

use std::collections::BTreeMap;

use parking_lot::Mutex;
use todoapp_model::{Task, TaskId};

use super::{RepositoryError, TaskRepository};

/// Cache contents.
#[derive(Debug, Default)]
struct CacheState {
    /// Tasks seen so far, from full loads or single lookups and writes.
    tasks: BTreeMap<TaskId, Task>,
    /// Whether `tasks` holds a complete list from a full load.
    filled: bool,
    /// Set by `refresh_tasks`; forces the next full load from the remote.
    dirty: bool,
}

/// Repository that caches a local source and keeps a remote source in sync.
#[derive(Debug)]
pub struct CachedRepository<L: TaskRepository, R: TaskRepository> {
    local: L,
    remote: R,
    cache: Mutex<CacheState>,
}

impl<L: TaskRepository, R: TaskRepository> CachedRepository<L, R> {
    /// Creates a repository with an empty cache.
    pub fn new(local: L, remote: R) -> Self {
        Self {
            local,
            remote,
            cache: Mutex::new(CacheState::default()),
        }
    }

    /// The local data source.
    pub const fn local(&self) -> &L {
        &self.local
    }

    /// The remote data source.
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    /// Whether the next full load will bypass cache and local source.
    pub fn is_cache_dirty(&self) -> bool {
        self.cache.lock().dirty
    }

    /// Returns the cached list if the cache is filled and clean.
    fn cached_tasks(&self) -> Option<Vec<Task>> {
        let cache = self.cache.lock();
        if cache.dirty || !cache.filled {
            return None;
        }
        Some(cache.tasks.values().cloned().collect())
    }

    /// Replaces the cache contents and clears the dirty flag.
    fn refresh_cache(&self, tasks: &[Task]) {
        let mut cache = self.cache.lock();
        cache.tasks = tasks.iter().map(|t| (t.id.clone(), t.clone())).collect();
        cache.filled = true;
        cache.dirty = false;
    }

    /// Inserts or replaces one task in the cache.
    fn cache_put(&self, task: &Task) {
        self.cache
            .lock()
            .tasks
            .insert(task.id.clone(), task.clone());
    }

    /// Fetches everything from the remote and rewrites local and cache.
    async fn load_from_remote(&self) -> Result<Vec<Task>, RepositoryError> {
        let tasks = self.remote.get_tasks().await?;
        self.refresh_local(&tasks).await;
        self.refresh_cache(&tasks);
        tracing::debug!(count = tasks.len(), "task cache refreshed from remote");
        Ok(tasks)
    }

    /// Replaces the local copy. Failures leave the local copy stale but do
    /// not fail the read.
    async fn refresh_local(&self, tasks: &[Task]) {
        if let Err(err) = self.local.delete_all_tasks().await {
            tracing::warn!(error = %err, "could not clear local tasks");
            return;
        }
        for task in tasks {
            if let Err(err) = self.local.save_task(task).await {
                tracing::warn!(task_id = %task.id, error = %err, "could not write local task");
            }
        }
    }
}

impl<L: TaskRepository, R: TaskRepository> TaskRepository for CachedRepository<L, R> {
    async fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        if let Some(tasks) = self.cached_tasks() {
            return Ok(tasks);
        }

        if self.is_cache_dirty() {
            return self.load_from_remote().await;
        }

        match self.local.get_tasks().await {
            Ok(tasks) if !tasks.is_empty() => {
                self.refresh_cache(&tasks);
                Ok(tasks)
            }
            Ok(_) => self.load_from_remote().await,
            Err(err) => {
                tracing::warn!(error = %err, "local tasks unavailable, falling back to remote");
                self.load_from_remote().await
            }
        }
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        let cached = self.cache.lock().tasks.get(id).cloned();
        if cached.is_some() {
            return Ok(cached);
        }

        let local = match self.local.get_task(id).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "local lookup failed");
                None
            }
        };
        if let Some(task) = local {
            self.cache_put(&task);
            return Ok(Some(task));
        }

        let found = self.remote.get_task(id).await?;
        if let Some(task) = &found {
            // Later writes update the local copy in place, so it must exist.
            if let Err(err) = self.local.save_task(task).await {
                tracing::warn!(task_id = %id, error = %err, "could not write local task");
            }
            self.cache_put(task);
        }
        Ok(found)
    }

    async fn save_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.remote.save_task(task).await?;
        self.local.save_task(task).await?;
        self.cache_put(task);
        Ok(())
    }

    async fn complete_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.remote.complete_task(task).await?;
        self.local.complete_task(task).await?;
        self.cache_put(&task.clone().with_completed(true));
        Ok(())
    }

    async fn activate_task(&self, task: &Task) -> Result<(), RepositoryError> {
        self.remote.activate_task(task).await?;
        self.local.activate_task(task).await?;
        self.cache_put(&task.clone().with_completed(false));
        Ok(())
    }

    async fn clear_completed_tasks(&self) -> Result<(), RepositoryError> {
        self.remote.clear_completed_tasks().await?;
        self.local.clear_completed_tasks().await?;
        self.cache.lock().tasks.retain(|_, t| !t.completed);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.remote.delete_task(id).await?;
        self.local.delete_task(id).await?;
        self.cache.lock().tasks.remove(id);
        Ok(())
    }

    async fn delete_all_tasks(&self) -> Result<(), RepositoryError> {
        self.remote.delete_all_tasks().await?;
        self.local.delete_all_tasks().await?;
        self.cache.lock().tasks.clear();
        Ok(())
    }

    async fn refresh_tasks(&self) {
        self.cache.lock().dirty = true;
    }
}
