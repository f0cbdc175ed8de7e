//! Property tests for the task model.
//!
//! Uses proptest to verify:
//! 1. A task is empty exactly when both fields are whitespace.
//! 2. Every task passes exactly one of the Active / Completed filters.
//! 3. Filter names survive `Display` -> `FromStr`.

use proptest::prelude::*;
use todoapp_model::{Task, TaskId, TasksFilterType};

/// Strategy for strings made only of whitespace (including the empty string).
fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

/// Strategy for strings containing at least one visible character.
fn arb_text() -> impl Strategy<Value = String> {
    "[ ]{0,3}[a-zA-Z0-9]{1,24}[ ]{0,3}"
}

fn arb_filter() -> impl Strategy<Value = TasksFilterType> {
    prop_oneof![
        Just(TasksFilterType::All),
        Just(TasksFilterType::Active),
        Just(TasksFilterType::Completed),
    ]
}

proptest! {
    #[test]
    fn blank_fields_make_an_empty_task(title in arb_blank(), description in arb_blank()) {
        prop_assert!(Task::new(title, description).is_empty());
    }

    #[test]
    fn visible_title_is_never_empty(title in arb_text(), description in arb_blank()) {
        prop_assert!(!Task::new(title, description).is_empty());
    }

    #[test]
    fn visible_description_is_never_empty(title in arb_blank(), description in arb_text()) {
        prop_assert!(!Task::new(title, description).is_empty());
    }

    #[test]
    fn active_and_completed_partition_tasks(title in arb_text(), completed in any::<bool>()) {
        let task = Task::with_id(title, "", TaskId::from("fixed")).with_completed(completed);
        let active = TasksFilterType::Active.matches(&task);
        let done = TasksFilterType::Completed.matches(&task);
        prop_assert!(active != done);
        prop_assert!(TasksFilterType::All.matches(&task));
    }

    #[test]
    fn filter_names_parse_back(filter in arb_filter()) {
        let parsed: TasksFilterType = filter.to_string().parse().unwrap();
        prop_assert_eq!(parsed, filter);
    }
}
