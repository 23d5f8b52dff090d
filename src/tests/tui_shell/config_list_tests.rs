use super::*;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn view() -> ConfigListView {
    ConfigListView::new(vec![
        "vim".to_string(),
        "vim-extras".to_string(),
        "tmux".to_string(),
    ])
}

#[test]
fn typing_narrows_the_list() {
    let mut v = view();
    v.handle_key(key(KeyCode::Char('v')));
    v.handle_key(key(KeyCode::Char('i')));
    assert_eq!(v.filtered(), vec!["vim", "vim-extras"]);

    v.handle_key(key(KeyCode::Char('m')));
    v.handle_key(key(KeyCode::Char('-')));
    assert_eq!(v.filtered(), vec!["vim-extras"]);
}

#[test]
fn backspace_widens_again() {
    let mut v = view();
    v.handle_key(key(KeyCode::Char('t')));
    assert_eq!(v.filtered(), vec!["vim-extras", "tmux"]);
    v.handle_key(key(KeyCode::Backspace));
    assert_eq!(v.filtered().len(), 3);
}

#[test]
fn enter_requests_sync_of_the_selection() {
    let mut v = view();
    v.handle_key(key(KeyCode::Down));
    match v.handle_key(key(KeyCode::Enter)) {
        ConfigListOutcome::Sync(name) => assert_eq!(name, "vim-extras"),
        _ => panic!("expected sync outcome"),
    }
}

#[test]
fn enter_on_empty_filter_result_is_inert() {
    let mut v = view();
    for c in "zzz".chars() {
        v.handle_key(key(KeyCode::Char(c)));
    }
    assert!(matches!(
        v.handle_key(key(KeyCode::Enter)),
        ConfigListOutcome::None
    ));
}

#[test]
fn ctrl_e_hands_back_the_filter() {
    let mut v = view();
    v.handle_key(key(KeyCode::Char('v')));
    let outcome = v.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
    match outcome {
        ConfigListOutcome::ExitList(filter) => assert_eq!(filter, "v"),
        _ => panic!("expected exit-list outcome"),
    }
}

#[test]
fn selection_resets_when_filter_changes() {
    let mut v = view();
    v.handle_key(key(KeyCode::Down));
    v.handle_key(key(KeyCode::Char('t')));
    match v.handle_key(key(KeyCode::Enter)) {
        ConfigListOutcome::Sync(name) => assert_eq!(name, "vim-extras"),
        _ => panic!("expected sync outcome"),
    }
}
