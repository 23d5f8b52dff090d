use crossterm::event::{KeyCode, KeyEvent};

use crate::config::Repo;
use crate::tui::{Action, UiResult};

use super::super::focus::FocusMove;
use super::super::panel::{Panel, PanelId};
use super::super::panels::LogLevel;
use super::super::views::{
    ConfigListOutcome, ConfigListView, ConfirmKind, ConfirmOutcome, ConfirmView, ConflictOutcome,
    ExternalOutcome, ExternalView, MachineOutcome, MachineView, MenuAction, MenuOutcome, MenuView,
    OnboardingOutcome, OnboardingView, ViewState,
};
use super::runner::OpKind;
use super::App;

/// Per-view key dispatch. Each arm computes the view's outcome first and
/// applies App-level effects after, so the view borrow is released before
/// the App mutates itself.
pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    app.trace_key(key);
    match &mut app.view {
        ViewState::Dashboard => dashboard_key(app, key),
        ViewState::NoConfig => no_config_key(app, key),
        ViewState::Operation => operation_key(app, key),
        ViewState::Menu(view) => {
            let outcome = view.handle_key(key);
            menu_outcome(app, outcome);
        }
        ViewState::Onboarding(view) => {
            let outcome = view.handle_key(key);
            onboarding_outcome(app, outcome);
        }
        ViewState::Confirm(view) => {
            let kind = view.kind;
            let outcome = view.handle_key(key);
            confirm_outcome(app, kind, outcome);
        }
        ViewState::ConfigList(view) => {
            let outcome = view.handle_key(key);
            config_list_outcome(app, outcome);
        }
        ViewState::External(view) => {
            let outcome = view.handle_key(key);
            external_outcome(app, outcome);
        }
        ViewState::Machine(view) => {
            let outcome = view.handle_key(key);
            machine_outcome(app, outcome);
        }
        ViewState::Conflict(view) => {
            let outcome = view.handle_key(key);
            if let ConflictOutcome::Resolved(choice) = outcome {
                app.pop_view();
                app.resolve_conflicts(choice);
            }
        }
    }
}

fn dashboard_key(app: &mut App, key: KeyEvent) {
    let keymap = app.keymap.clone();
    match key.code {
        code if code == keymap.quit => app.finish_quit(),
        KeyCode::Esc => app.finish_quit(),
        code if code == keymap.menu => app.push_view(ViewState::Menu(MenuView::default())),
        code if code == keymap.refresh => app.refresh_all(),
        code if code == keymap.bulk_sync => {
            if let Some(name) = app.panels.configs.selected_row().map(|r| r.name.clone()) {
                app.request_operation(OpKind::BulkSync(name));
            }
        }
        code if code == keymap.sync => app.request_operation(OpKind::Sync),
        code if code == keymap.doctor => app.request_operation(OpKind::Doctor),
        code if code == keymap.update => app.request_operation(OpKind::Update),
        code if code == keymap.install => app.request_operation(OpKind::Install),
        code if code == keymap.cycle => {
            let next = app.focus.cycle_next();
            app.apply_focus(next);
        }
        code if code == keymap.cycle_back => {
            let prev = app.focus.cycle_prev();
            app.apply_focus(prev);
        }
        KeyCode::Left => spatial(app, FocusMove::Left),
        KeyCode::Right => spatial(app, FocusMove::Right),
        KeyCode::Char(c @ '0'..='9') => {
            let n = c.to_digit(10).unwrap_or(0) as usize;
            if let Some(id) = app.focus.jump(n) {
                app.apply_focus(id);
            }
        }
        KeyCode::Enter => match app.focus.current() {
            PanelId::Configs => {
                if let Some(name) = app.panels.configs.selected_row().map(|r| r.name.clone()) {
                    app.request_operation(OpKind::SyncSingle(name));
                }
            }
            PanelId::External => {
                if let Some(name) = app
                    .panels
                    .external
                    .selected_status()
                    .map(|s| s.name.clone())
                {
                    app.request_operation(OpKind::ExternalSingle(name));
                }
            }
            _ => {}
        },
        // Up/Down scroll the focused panel rather than moving focus;
        // vertical focus moves go through the grid on Left/Right plus Tab.
        _ => forward_to_focused(app, key),
    }
}

fn spatial(app: &mut App, dir: FocusMove) {
    let id = app.focus.spatial(dir);
    app.apply_focus(id);
}

fn forward_to_focused(app: &mut App, key: KeyEvent) {
    let id = app.focus.current();
    if !id.is_scrollable() {
        // Display-only panels have nothing to scroll, so Up/Down move
        // focus through the grid instead.
        match key.code {
            KeyCode::Up => spatial(app, FocusMove::Up),
            KeyCode::Down => spatial(app, FocusMove::Down),
            _ => {}
        }
        return;
    }
    app.panels.get_mut(id).handle_key(key);
    app.refresh_details();
}

fn no_config_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.finish_quit(),
        KeyCode::Char('i') | KeyCode::Enter => {
            let start = std::env::current_dir().unwrap_or_else(|_| ".".into());
            app.push_view(ViewState::Onboarding(OnboardingView::new(&start)));
        }
        _ => {}
    }
}

/// While an operation runs the view is a full-screen log; input is limited
/// to scrolling it. Quitting waits for the Done message.
fn operation_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            if app.op_active {
                app.panels.output.log(
                    LogLevel::Warn,
                    "operation still running; it will finish in the background",
                );
            } else {
                app.pop_view();
            }
        }
        _ => {
            app.panels.output.handle_key(key);
        }
    }
}

fn menu_outcome(app: &mut App, outcome: MenuOutcome) {
    match outcome {
        MenuOutcome::None => {}
        MenuOutcome::Close => app.pop_view(),
        // Operation picks replace the menu; view picks layer on top of it,
        // so closing the sub-view returns to the menu.
        MenuOutcome::Pick(action) => match action {
            MenuAction::SyncAll => {
                app.pop_view();
                app.request_operation(OpKind::Sync);
            }
            MenuAction::Install => {
                app.pop_view();
                app.request_operation(OpKind::Install);
            }
            MenuAction::Doctor => {
                app.pop_view();
                app.request_operation(OpKind::Doctor);
            }
            MenuAction::Update => {
                app.pop_view();
                app.request_operation(OpKind::Update);
            }
            MenuAction::ConfigList => {
                let names = config_names(app.repo.as_ref());
                app.push_view(ViewState::ConfigList(ConfigListView::new(names)));
            }
            MenuAction::External => {
                let items = app.panels.external.items.clone();
                app.push_view(ViewState::External(ExternalView::new(items)));
            }
            MenuAction::Machine => {
                let items = machine_items(app);
                app.push_view(ViewState::Machine(MachineView::new(items)));
            }
            MenuAction::Uninstall => {
                let count = config_names(app.repo.as_ref()).len();
                app.push_view(ViewState::Confirm(ConfirmView::new(
                    ConfirmKind::Uninstall,
                    format!("Remove all {count} managed symlinks?"),
                    vec!["Sources inside the repository are left untouched.".to_string()],
                )));
            }
            MenuAction::Quit => app.finish_quit(),
        },
    }
}

fn config_names(repo: Option<&Repo>) -> Vec<String> {
    repo.map(|r| r.config.configs.iter().map(|e| e.name.clone()).collect())
        .unwrap_or_default()
}

fn machine_items(app: &App) -> Vec<crate::model::MachineStatus> {
    app.repo
        .as_ref()
        .map(|r| crate::machine::statuses(r, &app.machine_values))
        .unwrap_or_default()
}

fn onboarding_outcome(app: &mut App, outcome: OnboardingOutcome) {
    match outcome {
        OnboardingOutcome::None => {}
        OnboardingOutcome::Cancel => app.pop_view(),
        OnboardingOutcome::Complete(dir) => match Repo::init(&dir, false) {
            Ok(repo) => {
                app.repo = Some(repo);
                app.repo_err = None;
                app.reset_to_dashboard();
                app.refresh_all();
                app.panels
                    .output
                    .log(LogLevel::Success, format!("initialized {}", dir.display()));
            }
            Err(err) => {
                app.repo_err = Some(format!("{err:#}"));
            }
        },
    }
}

fn confirm_outcome(app: &mut App, kind: ConfirmKind, outcome: ConfirmOutcome) {
    match outcome {
        ConfirmOutcome::None => {}
        ConfirmOutcome::Resolved(false) => app.pop_view(),
        ConfirmOutcome::Resolved(true) => {
            app.pop_view();
            match kind {
                ConfirmKind::Uninstall => app.request_operation(OpKind::Uninstall),
            }
        }
    }
}

fn config_list_outcome(app: &mut App, outcome: ConfigListOutcome) {
    match outcome {
        ConfigListOutcome::None => {}
        ConfigListOutcome::Close => app.pop_view(),
        ConfigListOutcome::Sync(name) => {
            app.pop_view();
            app.request_operation(OpKind::SyncSingle(name));
        }
        ConfigListOutcome::ExitList(filter) => {
            let names: Vec<String> = match &app.view {
                ViewState::ConfigList(view) => {
                    view.filtered().iter().map(|n| n.to_string()).collect()
                }
                _ => Vec::new(),
            };
            let selected = names.first().cloned();
            app.finish(UiResult {
                action: Action::List,
                config_name: None,
                config_names: names,
                selected_config: selected,
                filter_text: if filter.is_empty() { None } else { Some(filter) },
            });
        }
    }
}

fn external_outcome(app: &mut App, outcome: ExternalOutcome) {
    match outcome {
        ExternalOutcome::None => {}
        ExternalOutcome::Close => app.pop_view(),
        ExternalOutcome::Clone(name) => {
            app.pop_view();
            app.request_operation(OpKind::ExternalSingle(name));
        }
    }
}

fn machine_outcome(app: &mut App, outcome: MachineOutcome) {
    match outcome {
        MachineOutcome::None => {}
        MachineOutcome::Close => app.pop_view(),
        MachineOutcome::SetValue(key, value) => {
            app.machine_values.insert(key.clone(), value);
            let saved = match app.repo.as_ref() {
                Some(repo) => crate::machine::save_values(&repo.root, &app.machine_values),
                None => Ok(()),
            };
            match saved {
                Ok(()) => app
                    .panels
                    .output
                    .log(LogLevel::Success, format!("set machine value {key}")),
                Err(err) => app.panels.output.log(LogLevel::Error, format!("{err:#}")),
            }
            rebuild_machine_view(app);
        }
        MachineOutcome::Render(key) => {
            let result = app.repo.as_ref().map(|repo| {
                let prompt = repo.config.machine.iter().find(|p| p.key == key);
                match prompt {
                    Some(prompt) => crate::machine::render_write(repo, prompt, &app.machine_values),
                    None => Err(anyhow::anyhow!("unknown machine key {key:?}")),
                }
            });
            match result {
                Some(Ok(())) => app
                    .panels
                    .output
                    .log(LogLevel::Success, format!("rendered {key}")),
                Some(Err(err)) => app.panels.output.log(LogLevel::Error, format!("{err:#}")),
                None => {}
            }
            rebuild_machine_view(app);
        }
    }
}

fn rebuild_machine_view(app: &mut App) {
    let items = machine_items(app);
    if let ViewState::Machine(view) = &mut app.view {
        view.items = items.clone();
    }
    app.panels.overrides.set_items(items);
    app.refresh_details();
}

#[cfg(test)]
#[path = "../../tests/tui_shell/keys_tests.rs"]
mod tests;
