//! Task list filtering.

use std::str::FromStr;

use crate::task::Task;

/// Which tasks the list screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TasksFilterType {
    /// Every task.
    #[default]
    All,
    /// Tasks that are not completed.
    Active,
    /// Completed tasks only.
    Completed,
}

impl TasksFilterType {
    /// Whether `task` passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => task.is_active(),
            Self::Completed => task.completed,
        }
    }

    /// Cycle to the next filter: All -> Active -> Completed -> All.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

impl std::fmt::Display for TasksFilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Error returned when a filter name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?} (expected all, active or completed)")]
pub struct ParseFilterError(pub String);

impl FromStr for TasksFilterType {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}
