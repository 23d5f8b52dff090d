use super::*;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn view() -> ConfirmView {
    ConfirmView::new(ConfirmKind::Uninstall, "Remove links?", Vec::new())
}

#[test]
fn defaults_to_no() {
    let mut v = view();
    match v.handle_key(key(KeyCode::Enter)) {
        ConfirmOutcome::Resolved(yes) => assert!(!yes),
        ConfirmOutcome::None => panic!("enter should resolve"),
    }
}

#[test]
fn tab_toggles_and_enter_commits() {
    let mut v = view();
    assert!(matches!(v.handle_key(key(KeyCode::Tab)), ConfirmOutcome::None));
    match v.handle_key(key(KeyCode::Enter)) {
        ConfirmOutcome::Resolved(yes) => assert!(yes),
        ConfirmOutcome::None => panic!("enter should resolve"),
    }
}

#[test]
fn y_then_n_lands_on_no() {
    let mut v = view();
    v.handle_key(key(KeyCode::Char('y')));
    v.handle_key(key(KeyCode::Char('n')));
    match v.handle_key(key(KeyCode::Enter)) {
        ConfirmOutcome::Resolved(yes) => assert!(!yes),
        ConfirmOutcome::None => panic!("enter should resolve"),
    }
}

#[test]
fn esc_always_declines() {
    let mut v = view();
    v.handle_key(key(KeyCode::Char('y')));
    match v.handle_key(key(KeyCode::Esc)) {
        ConfirmOutcome::Resolved(yes) => assert!(!yes),
        ConfirmOutcome::None => panic!("esc should resolve"),
    }
}
