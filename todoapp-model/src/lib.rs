//! Shared model definitions for `todoapp`: the task entity, list filtering,
//! and the message codes state containers hand to the view layer.

pub mod filter;
pub mod message;
pub mod task;

pub use filter::{ParseFilterError, TasksFilterType};
pub use message::{EditResult, UserMessage};
pub use task::{Task, TaskId};
