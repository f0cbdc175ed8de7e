//! Message codes emitted by state containers.
//!
//! Containers never produce user-facing text. They emit a [`UserMessage`]
//! code and the view layer decides how to phrase it.

/// A transient, user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserMessage {
    /// Save was attempted with a blank title and description.
    EmptyTask,
    /// A task was marked complete.
    TaskMarkedComplete,
    /// A task was marked active again.
    TaskMarkedActive,
    /// Completed tasks were removed.
    CompletedTasksCleared,
    /// An existing task was saved.
    TaskSaved,
    /// A new task was added.
    TaskAdded,
    /// A task was deleted.
    TaskDeleted,
    /// The task list could not be loaded.
    LoadingTasksError,
}

/// How the user left the add/edit or detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// A new task was created.
    Added,
    /// An existing task was saved.
    Saved,
    /// The task was deleted.
    Deleted,
}

impl From<EditResult> for UserMessage {
    fn from(result: EditResult) -> Self {
        match result {
            EditResult::Added => Self::TaskAdded,
            EditResult::Saved => Self::TaskSaved,
            EditResult::Deleted => Self::TaskDeleted,
        }
    }
}
