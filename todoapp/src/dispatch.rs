//! Execution contexts for state-container work.
//!
//! Every state container closes over an `Arc<dyn Dispatcher>` and hands each
//! unit of work (a `start`, a `save`, a toggle) to it. Production code runs
//! work on the tokio runtime via [`TokioDispatcher`]; tests and synchronous
//! callers use [`ImmediateDispatcher`], which finishes the work before
//! `dispatch` returns.

use futures::future::BoxFuture;
use tokio::runtime::Handle;

/// A unit of state-container work.
pub type Work = BoxFuture<'static, ()>;

/// Runs units of work on some execution context.
pub trait Dispatcher: Send + Sync {
    /// Schedule `work`. Implementations may run it before returning.
    fn dispatch(&self, work: Work);
}

/// Runs each unit of work to completion on the calling thread.
///
/// Work must not depend on a tokio reactor (timers, sockets): it is driven by
/// a plain `futures` executor. Do not call from inside a tokio task.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateDispatcher;

impl Dispatcher for ImmediateDispatcher {
    fn dispatch(&self, work: Work) {
        futures::executor::block_on(work);
    }
}

/// Spawns each unit of work onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
}

impl TokioDispatcher {
    /// Creates a dispatcher for the given runtime.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates a dispatcher for the runtime the caller is running on.
    ///
    /// Returns `None` outside of a tokio runtime.
    #[must_use]
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, work: Work) {
        drop(self.handle.spawn(work));
    }
}
