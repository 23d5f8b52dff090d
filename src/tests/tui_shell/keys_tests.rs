use super::*;

use crossterm::event::KeyModifiers;

use super::super::super::views::ViewId;
use crate::tui::TuiRunOptions;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn test_app() -> App {
    let mut app = App::load(&TuiRunOptions {
        dir: Some(std::env::temp_dir()),
        trace: None,
    });
    app.view = ViewState::Dashboard;
    app
}

#[test]
fn closing_a_menu_sub_view_returns_to_the_menu() {
    let mut app = test_app();

    handle_key(&mut app, key(KeyCode::Char('m')));
    assert_eq!(app.view.id(), ViewId::Menu);

    // Down to "External Dependencies", open it, close it again.
    for _ in 0..5 {
        handle_key(&mut app, key(KeyCode::Down));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.view.id(), ViewId::External);

    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view.id(), ViewId::Menu);

    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view.id(), ViewId::Dashboard);
    assert!(app.view_stack.is_empty());
}

#[test]
fn config_list_and_machine_also_layer_over_the_menu() {
    let mut app = test_app();

    handle_key(&mut app, key(KeyCode::Char('m')));
    for _ in 0..4 {
        handle_key(&mut app, key(KeyCode::Down));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.view.id(), ViewId::ConfigList);
    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view.id(), ViewId::Menu);

    for _ in 0..2 {
        handle_key(&mut app, key(KeyCode::Down));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.view.id(), ViewId::Machine);
    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view.id(), ViewId::Menu);
}

#[test]
fn declining_the_uninstall_confirm_returns_to_the_menu() {
    let mut app = test_app();

    handle_key(&mut app, key(KeyCode::Char('m')));
    for _ in 0..7 {
        handle_key(&mut app, key(KeyCode::Down));
    }
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.view.id(), ViewId::Confirm);

    // Esc resolves to No, which drops back into the menu.
    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view.id(), ViewId::Menu);
}
