use super::*;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::super::views::{ConfigListView, MenuView, ViewId};
use crate::tui::TuiRunOptions;

fn test_app() -> App {
    let mut app = App::load(&TuiRunOptions {
        dir: Some(std::env::temp_dir()),
        trace: None,
    });
    app.view = ViewState::Dashboard;
    app
}

#[test]
fn push_and_pop_round_trip_preserves_sub_state() {
    let mut app = test_app();

    let mut list = ConfigListView::new(vec!["vim".to_string(), "tmux".to_string()]);
    list.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE));
    app.push_view(ViewState::ConfigList(list));
    app.push_view(ViewState::Menu(MenuView::default()));
    assert_eq!(app.view.id(), ViewId::Menu);

    app.pop_view();
    match &app.view {
        ViewState::ConfigList(list) => {
            // The half-typed filter survived the detour through the menu.
            assert_eq!(list.filter, "v");
        }
        _ => panic!("expected the config list back"),
    }

    app.pop_view();
    assert_eq!(app.view.id(), ViewId::Dashboard);
    assert!(app.view_stack.is_empty());
}

#[test]
fn pop_on_empty_stack_lands_on_dashboard() {
    let mut app = test_app();
    app.view = ViewState::Menu(MenuView::default());
    app.pop_view();
    assert_eq!(app.view.id(), ViewId::Dashboard);
    app.pop_view();
    assert_eq!(app.view.id(), ViewId::Dashboard);
}

#[test]
fn reset_drops_the_whole_history() {
    let mut app = test_app();
    app.push_view(ViewState::Menu(MenuView::default()));
    app.push_view(ViewState::NoConfig);
    app.reset_to_dashboard();
    assert_eq!(app.view.id(), ViewId::Dashboard);
    assert!(app.view_stack.is_empty());
}
