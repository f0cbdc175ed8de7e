//! Integration tests for the terminal front end's screen flow.
//!
//! Drives [`App`] with key events over an immediate dispatcher and checks
//! which screen is shown, what the status bar says, and what reached the
//! repository.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod support;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use todoapp::app::{App, EditField, Screen};
use todoapp::repository::{
    CachedRepository, FakeRemoteDataSource, InMemoryDataSource, TaskRepository,
};
use todoapp::ui;
use todoapp_model::{TasksFilterType, UserMessage};

use support::{block_on, immediate};

type Repo = CachedRepository<InMemoryDataSource, FakeRemoteDataSource>;

fn make_app() -> (App<Repo>, Arc<Repo>) {
    let repo = Arc::new(CachedRepository::new(
        InMemoryDataSource::new(),
        FakeRemoteDataSource::with_demo_tasks(Duration::ZERO),
    ));
    let app = App::new(Arc::clone(&repo), immediate(), TasksFilterType::All);
    app.start();
    (app, repo)
}

fn press(app: &mut App<Repo>, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    app.tick();
}

fn type_text(app: &mut App<Repo>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen_text(app: &App<Repo>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

// =============================================================================
// Task list
// =============================================================================

#[test]
fn test_list_shows_demo_tasks() {
    let (app, _repo) = make_app();
    assert!(matches!(app.screen, Screen::Tasks));
    assert_eq!(app.tasks.items().get().len(), 2);

    let text = screen_text(&app);
    assert!(text.contains("Build tower in Pisa"));
    assert!(text.contains("Tasks (all)"));
}

#[test]
fn test_selection_stays_in_bounds() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Up);
    assert_eq!(app.selected, 0);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected, 1);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.selected, 0);
}

#[test]
fn test_space_toggles_selected_task() {
    let (mut app, repo) = make_app();
    let first = app.selected_task().unwrap();

    press(&mut app, KeyCode::Char(' '));

    assert_eq!(app.status_message, Some(UserMessage::TaskMarkedComplete));
    let stored = block_on(repo.local().get_task(&first.id)).unwrap().unwrap();
    assert!(stored.completed);
}

#[test]
fn test_filter_cycles_and_hides_add() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.tasks.filter().get(), TasksFilterType::Active);

    press(&mut app, KeyCode::Char('a'));
    assert!(matches!(app.screen, Screen::Tasks), "add is hidden when filtered");

    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.tasks.filter().get(), TasksFilterType::All);
}

#[test]
fn test_quit_keys() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);

    let (mut app, _repo) = make_app();
    app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

// =============================================================================
// Add / edit
// =============================================================================

#[test]
fn test_add_task_flow() {
    let (mut app, repo) = make_app();
    press(&mut app, KeyCode::Char('a'));
    assert!(matches!(
        app.screen,
        Screen::AddEdit {
            focus: EditField::Title,
            ..
        }
    ));

    // Typing 'q' in a field must not quit.
    type_text(&mut app, "Write quarterly report");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "due friday");
    press(&mut app, KeyCode::Enter);

    assert!(matches!(app.screen, Screen::Tasks));
    assert!(!app.should_quit);
    assert_eq!(app.status_message, Some(UserMessage::TaskAdded));
    assert_eq!(app.tasks.items().get().len(), 3);
    let added = block_on(repo.remote().get_tasks())
        .unwrap()
        .into_iter()
        .find(|t| t.title == "Write quarterly report")
        .unwrap();
    assert_eq!(added.description, "due friday");
}

#[test]
fn test_empty_add_stays_on_form() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Enter);

    assert!(matches!(app.screen, Screen::AddEdit { .. }));
    assert_eq!(app.status_message, Some(UserMessage::EmptyTask));
    assert!(screen_text(&app).contains("Tasks cannot be empty"));

    press(&mut app, KeyCode::Esc);
    assert!(matches!(app.screen, Screen::Tasks));
    assert_eq!(app.tasks.items().get().len(), 2);
}

#[test]
fn test_backspace_edits_focused_field() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "abc");
    press(&mut app, KeyCode::Backspace);

    let Screen::AddEdit { state, .. } = &app.screen else {
        panic!("expected add/edit screen");
    };
    assert_eq!(state.title().get(), "ab");
    assert_eq!(state.description().get(), "");
}

// =============================================================================
// Detail
// =============================================================================

#[test]
fn test_open_edit_and_save_existing() {
    let (mut app, repo) = make_app();
    let first = app.selected_task().unwrap();

    press(&mut app, KeyCode::Enter);
    let Screen::Detail(detail) = &app.screen else {
        panic!("expected detail screen");
    };
    assert_eq!(detail.task().get(), Some(first.clone()));

    press(&mut app, KeyCode::Char('e'));
    let Screen::AddEdit { state, .. } = &app.screen else {
        panic!("expected edit screen");
    };
    assert!(!state.is_new_task());
    assert_eq!(state.title().get(), first.title);

    type_text(&mut app, "!");
    press(&mut app, KeyCode::Enter);

    assert!(matches!(app.screen, Screen::Tasks));
    assert_eq!(app.status_message, Some(UserMessage::TaskSaved));
    let stored = block_on(repo.get_task(&first.id)).unwrap().unwrap();
    assert_eq!(stored.title, format!("{}!", first.title));
    assert_eq!(app.tasks.items().get().len(), 2);
}

#[test]
fn test_detail_toggle_and_delete() {
    let (mut app, repo) = make_app();
    let first = app.selected_task().unwrap();
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.status_message, Some(UserMessage::TaskMarkedComplete));
    assert!(matches!(app.screen, Screen::Detail(_)));

    press(&mut app, KeyCode::Char('d'));
    assert!(matches!(app.screen, Screen::Tasks));
    assert_eq!(app.status_message, Some(UserMessage::TaskDeleted));
    assert_eq!(app.tasks.items().get().len(), 1);
    assert_eq!(block_on(repo.get_task(&first.id)).unwrap(), None);
}

#[test]
fn test_escape_from_detail_returns_to_list() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);
    assert!(matches!(app.screen, Screen::Tasks));
    assert!(!app.should_quit);
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn test_statistics_screen() {
    let (mut app, _repo) = make_app();
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('s'));

    let Screen::Statistics(stats) = &app.screen else {
        panic!("expected statistics screen");
    };
    assert_eq!(stats.active_count().get(), 1);
    assert_eq!(stats.completed_count().get(), 1);
    assert!(screen_text(&app).contains("Completed tasks: 1"));

    press(&mut app, KeyCode::Esc);
    assert!(matches!(app.screen, Screen::Tasks));
}
