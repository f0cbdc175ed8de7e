//! Active/completed counts for the statistics screen.

use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::observable::Observable;
use crate::repository::TaskRepository;

struct Inner<R> {
    repository: Arc<R>,
    active_count: Observable<usize>,
    completed_count: Observable<usize>,
    loading: Observable<bool>,
    empty: Observable<bool>,
    loading_error: Observable<bool>,
}

pub struct StatisticsState<R: TaskRepository> {
    inner: Arc<Inner<R>>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<R: TaskRepository> Clone for StatisticsState<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<R: TaskRepository + 'static> StatisticsState<R> {
    pub fn new(repository: Arc<R>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                active_count: Observable::new(0),
                completed_count: Observable::new(0),
                loading: Observable::new(false),
                empty: Observable::new(false),
                loading_error: Observable::new(false),
            }),
            dispatcher,
        }
    }

    pub fn active_count(&self) -> &Observable<usize> {
        &self.inner.active_count
    }

    pub fn completed_count(&self) -> &Observable<usize> {
        &self.inner.completed_count
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.inner.loading
    }

    /// True when there are no tasks at all.
    pub fn empty(&self) -> &Observable<bool> {
        &self.inner.empty
    }

    pub fn loading_error(&self) -> &Observable<bool> {
        &self.inner.loading_error
    }

    /// Fetches all tasks and recomputes the counts.
    pub fn start(&self) {
        let inner = Arc::clone(&self.inner);
        self.dispatcher
            .dispatch(Box::pin(async move { inner.load().await }));
    }
}

impl<R: TaskRepository> Inner<R> {
    async fn load(&self) {
        self.loading.set(true);
        let result = self.repository.get_tasks().await;
        self.loading.set(false);

        match result {
            Ok(tasks) => {
                let completed = tasks.iter().filter(|t| t.completed).count();
                let active = tasks.len() - completed;
                self.active_count.set(active);
                self.completed_count.set(completed);
                self.empty.set(tasks.is_empty());
                self.loading_error.set(false);
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load statistics");
                self.loading_error.set(true);
            }
        }
    }
}
