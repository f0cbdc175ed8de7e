//! The task entity.
//!
//! A [`Task`] is a short piece of text with a completion flag. Identifiers
//! are UUID v7 strings, so ordering tasks by id orders them by creation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task.
///
/// Freshly created ids are time-ordered UUID v7 strings. Ids coming from
/// elsewhere (a remote store, a test fixture) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new time-ordered task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the string form of this identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: TaskId,
    /// Short title. May be blank if the description is not.
    pub title: String,
    /// Free-form description. May be blank if the title is not.
    pub description: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

impl Task {
    /// Creates an active task with a fresh identifier.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(title, description, TaskId::new())
    }

    /// Creates an active task that keeps the given identifier.
    pub fn with_id(title: impl Into<String>, description: impl Into<String>, id: TaskId) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Returns this task with its completion flag set.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// True when both title and description are blank.
    ///
    /// Empty tasks are rejected before they reach a repository.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }

    /// True when the task has not been completed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.completed
    }

    /// The text to show for this task in a one-line list row.
    #[must_use]
    pub fn title_for_list(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.description
        } else {
            &self.title
        }
    }
}
