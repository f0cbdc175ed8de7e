//! State containers for the task screens.
//!
//! Each container owns the fields one screen renders, exposes them as
//! [`Observable`](crate::observable::Observable)s, and reports transient
//! outcomes (status messages, navigation requests) through
//! [`SingleEvent`](crate::observable::SingleEvent)s. Entry points hand their
//! work to the container's [`Dispatcher`](crate::dispatch::Dispatcher) and
//! return immediately.
//!
//! Containers are cheap to clone; clones share the same state.

pub mod add_edit;
pub mod detail;
pub mod statistics;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

pub use add_edit::AddEditTaskState;
pub use detail::TaskDetailState;
pub use statistics::StatisticsState;
pub use tasks::TasksState;
