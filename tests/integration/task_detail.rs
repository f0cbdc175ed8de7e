//! Integration tests for the task detail state.
//!
//! # Verification Focus
//!
//! - Completion toggles reach the repository and report the right message
//! - Delete with and without a loaded task
//! - The loading guard under a real runtime

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod support;

use std::sync::Arc;
use std::time::Duration;

use todoapp::dispatch::TokioDispatcher;
use todoapp::repository::{
    CachedRepository, FakeRemoteDataSource, InMemoryDataSource, TaskRepository,
};
use todoapp::state::TaskDetailState;
use todoapp_model::{Task, TaskId, UserMessage};

use support::{CountingRepository, GatedRepository, block_on, immediate, settle, wait_until};

fn task_42() -> Task {
    Task::with_id("Find the question", "", TaskId::from("42"))
}

fn cached_with(tasks: &[Task]) -> Arc<CachedRepository<InMemoryDataSource, FakeRemoteDataSource>> {
    let repo = CachedRepository::new(
        InMemoryDataSource::new(),
        FakeRemoteDataSource::new(Duration::ZERO),
    );
    for task in tasks {
        block_on(repo.save_task(task)).unwrap();
    }
    Arc::new(repo)
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn test_complete_then_activate() {
    let repo = cached_with(&[task_42()]);
    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());
    detail.start(Some(TaskId::from("42")));
    assert!(detail.is_data_available());
    assert!(!detail.completed().get());

    detail.set_completed(true);
    assert_eq!(
        detail.snackbar_message().take(),
        Some(UserMessage::TaskMarkedComplete)
    );
    let remote = block_on(repo.remote().get_task(&TaskId::from("42"))).unwrap();
    assert!(remote.unwrap().completed);

    detail.set_completed(false);
    assert_eq!(
        detail.snackbar_message().take(),
        Some(UserMessage::TaskMarkedActive)
    );
    let local = block_on(repo.local().get_task(&TaskId::from("42"))).unwrap();
    assert!(!local.unwrap().completed);
    assert!(!detail.completed().get());
}

#[test]
fn test_complete_task_known_only_to_remote() {
    let repo = Arc::new(CachedRepository::new(
        InMemoryDataSource::new(),
        FakeRemoteDataSource::new(Duration::ZERO),
    ));
    block_on(repo.remote().save_task(&task_42())).unwrap();

    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());
    detail.start(Some(TaskId::from("42")));
    detail.set_completed(true);

    assert_eq!(
        detail.snackbar_message().take(),
        Some(UserMessage::TaskMarkedComplete)
    );
    assert!(detail.completed().get());
    assert!(detail.task().get().unwrap().completed);
    let local = block_on(repo.local().get_task(&TaskId::from("42"))).unwrap();
    assert!(local.unwrap().completed);
}

#[test]
fn test_refresh_picks_up_external_change() {
    let repo = cached_with(&[task_42()]);
    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());
    detail.start(Some(TaskId::from("42")));

    block_on(repo.complete_task(&task_42())).unwrap();
    detail.on_refresh();

    assert!(detail.completed().get());
    assert!(detail.task().get().unwrap().completed);
}

#[tokio::test]
async fn test_toggle_while_loading_is_ignored() {
    let repo = Arc::new(GatedRepository::with_tasks([task_42()]));
    let dispatcher = Arc::new(TokioDispatcher::current().unwrap());
    let detail = TaskDetailState::new(Arc::clone(&repo), dispatcher);

    detail.start(Some(TaskId::from("42")));
    wait_until(|| detail.loading().get()).await;

    detail.set_completed(true);
    settle(10).await;
    assert_eq!(repo.writes(), 0);

    repo.open();
    wait_until(|| detail.is_data_available()).await;
    assert!(!detail.loading().get());
    assert!(!detail.completed().get());
    assert_eq!(detail.snackbar_message().peek(), None);
}

// =============================================================================
// Delete / edit
// =============================================================================

#[test]
fn test_delete_loaded_task_removes_everywhere() {
    let repo = cached_with(&[task_42()]);
    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());
    detail.start(Some(TaskId::from("42")));
    detail.delete_task();

    assert_eq!(detail.delete_task_command().take(), Some(()));
    assert_eq!(detail.delete_task_command().take(), None);
    assert!(repo.local().is_empty());
    assert!(block_on(repo.get_tasks()).unwrap().is_empty());
}

#[test]
fn test_delete_with_nothing_loaded_is_noop() {
    let repo = Arc::new(CountingRepository::with_tasks([task_42()]));
    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());

    detail.delete_task();

    assert_eq!(repo.calls(), 0);
    assert_eq!(detail.delete_task_command().peek(), None);
    assert_eq!(repo.stored_tasks().len(), 1);
}

#[test]
fn test_missing_task_shows_no_data() {
    let repo = Arc::new(CountingRepository::default());
    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());
    detail.start(Some(TaskId::from("missing")));

    assert_eq!(repo.calls(), 1);
    assert!(!detail.is_data_available());
    assert!(!detail.loading().get());

    // Nothing to delete or refresh.
    detail.delete_task();
    detail.on_refresh();
    assert_eq!(repo.calls(), 1);
}

#[test]
fn test_edit_command_is_delivered_once() {
    let repo = cached_with(&[task_42()]);
    let detail = TaskDetailState::new(Arc::clone(&repo), immediate());
    detail.start(Some(TaskId::from("42")));
    detail.edit_task();

    assert_eq!(detail.edit_task_command().take(), Some(()));
    assert_eq!(detail.edit_task_command().take(), None);
}
