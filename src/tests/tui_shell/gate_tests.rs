use super::*;

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::{Config, ConfigEntry};
use crate::tui::TuiRunOptions;

use super::super::super::views::ViewId;
use super::super::runner::{OpMessage, UiMsg};

fn test_repo(root: &Path, names: &[&str]) -> Repo {
    let targets = root.join("home");
    fs::create_dir_all(&targets).expect("mkdir targets");
    let configs = names
        .iter()
        .map(|name| {
            fs::write(root.join(format!("src-{name}")), *name).expect("write source");
            ConfigEntry {
                name: name.to_string(),
                source: format!("src-{name}").into(),
                target: targets.join(name),
                depends_on: Vec::new(),
                ignore: Vec::new(),
            }
        })
        .collect();
    Repo {
        root: root.to_path_buf(),
        config: Config {
            configs,
            ..Default::default()
        },
    }
}

fn app_with(repo: Repo) -> App {
    let mut app = App::load(&TuiRunOptions {
        dir: Some(std::env::temp_dir()),
        trace: None,
    });
    app.repo = Some(repo);
    app.view = ViewState::Dashboard;
    app
}

fn wait_for_done(app: &App) -> (bool, String) {
    loop {
        let msg = app
            .msg_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should report back");
        if let UiMsg::Op(OpMessage::Done { success, summary }) = msg {
            return (success, summary);
        }
    }
}

#[cfg(unix)]
#[test]
fn clean_scope_launches_immediately() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut app = app_with(test_repo(tmp.path(), &["vim"]));

    app.request_operation(OpKind::SyncSingle("vim".to_string()));
    assert!(app.op_active);
    assert!(app.pending_op.is_none());
    assert_eq!(app.view.id(), ViewId::Operation);

    let (success, summary) = wait_for_done(&app);
    assert!(success, "{summary}");
    assert!(tmp.path().join("home/vim").is_symlink());
    assert!(tmp.path().join(".plait/state.json").is_file());
}

#[cfg(unix)]
#[test]
fn conflicts_park_the_operation() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repo = test_repo(tmp.path(), &["vim"]);
    fs::write(tmp.path().join("home/vim"), "old config").expect("occupy target");
    let mut app = app_with(repo);

    app.request_operation(OpKind::Sync);
    assert!(!app.op_active);
    assert_eq!(app.view.id(), ViewId::Conflict);
    let pending = app.pending_op.as_ref().expect("parked operation");
    assert_eq!(pending.kind, OpKind::Sync);
    assert_eq!(pending.conflicts.len(), 1);
    assert_eq!(pending.conflicts[0].config, "vim");
}

#[cfg(unix)]
#[test]
fn cancel_drops_the_parked_operation() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repo = test_repo(tmp.path(), &["vim"]);
    fs::write(tmp.path().join("home/vim"), "old config").expect("occupy target");
    let mut app = app_with(repo);

    app.request_operation(OpKind::Sync);
    app.pop_view();
    app.resolve_conflicts(ConflictChoice::Cancel);

    assert!(!app.op_active);
    assert!(app.pending_op.is_none());
    // The blocking file is untouched.
    assert_eq!(
        fs::read_to_string(tmp.path().join("home/vim")).expect("read"),
        "old config"
    );
}

#[cfg(unix)]
#[test]
fn backup_remediates_then_resumes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repo = test_repo(tmp.path(), &["vim"]);
    fs::write(tmp.path().join("home/vim"), "old config").expect("occupy target");
    let mut app = app_with(repo);

    app.request_operation(OpKind::SyncSingle("vim".to_string()));
    app.pop_view();
    app.resolve_conflicts(ConflictChoice::Backup);
    assert!(app.op_active, "remediation should resume the parked sync");

    let (success, summary) = wait_for_done(&app);
    assert!(success, "{summary}");
    assert!(tmp.path().join("home/vim").is_symlink());

    // The displaced file survives under the backup root.
    let backups = tmp.path().join(".plait/backups");
    let stamp = fs::read_dir(&backups)
        .expect("backup root")
        .next()
        .expect("one stamp dir")
        .expect("dir entry");
    let mut found = Vec::new();
    collect_backed_up(&stamp.path(), &mut found);
    assert!(
        found
            .iter()
            .any(|p| fs::read_to_string(p).is_ok_and(|s| s == "old config"))
    );
}

fn collect_backed_up(dir: &Path, out: &mut Vec<std::path::PathBuf>) {
    for child in fs::read_dir(dir).expect("read dir") {
        let child = child.expect("dir entry");
        if child.file_type().expect("file type").is_dir() {
            collect_backed_up(&child.path(), out);
        } else {
            out.push(child.path());
        }
    }
}

#[cfg(unix)]
#[test]
fn delete_remediates_then_resumes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repo = test_repo(tmp.path(), &["vim"]);
    fs::write(tmp.path().join("home/vim"), "old config").expect("occupy target");
    let mut app = app_with(repo);

    app.request_operation(OpKind::SyncSingle("vim".to_string()));
    app.pop_view();
    app.resolve_conflicts(ConflictChoice::Delete);
    assert!(app.op_active);

    let (success, _) = wait_for_done(&app);
    assert!(success);
    assert!(tmp.path().join("home/vim").is_symlink());
}

#[cfg(unix)]
#[test]
fn remediation_logs_the_resolved_count() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let repo = test_repo(tmp.path(), &["vim", "tmux"]);
    fs::write(tmp.path().join("home/vim"), "a").expect("occupy target");
    fs::write(tmp.path().join("home/tmux"), "b").expect("occupy target");
    let mut app = app_with(repo);

    app.request_operation(OpKind::Sync);
    app.pop_view();
    app.resolve_conflicts(ConflictChoice::Delete);
    assert!(app.op_active);

    // The count opens the resumed operation's log.
    assert!(
        app.panels
            .output
            .entries
            .iter()
            .any(|e| e.text == "2 conflicts resolved"),
        "{:?}",
        app.panels.output.entries
    );
    let (success, _) = wait_for_done(&app);
    assert!(success);
}

#[cfg(unix)]
#[test]
fn partial_failure_keeps_other_links() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut repo = test_repo(tmp.path(), &["vim", "tmux"]);
    // Break one source after repo construction.
    fs::remove_file(tmp.path().join("src-tmux")).expect("remove source");
    repo.config.configs[1].source = "src-tmux".into();
    let mut app = app_with(repo);

    app.request_operation(OpKind::Sync);
    let (success, summary) = wait_for_done(&app);
    assert!(!success);
    assert!(summary.contains("1 failed"), "{summary}");
    assert!(tmp.path().join("home/vim").is_symlink());
}

#[test]
fn bulk_scope_expands_to_dependents() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut repo = test_repo(tmp.path(), &["vim", "vim-extras"]);
    repo.config.configs[1].depends_on = vec!["vim".to_string()];
    let mut app = app_with(repo);

    // Occupy both targets so the pending op records the expanded scope.
    fs::write(tmp.path().join("home/vim"), "a").expect("occupy");
    fs::write(tmp.path().join("home/vim-extras"), "b").expect("occupy");

    app.request_operation(OpKind::BulkSync("vim".to_string()));
    let pending = app.pending_op.as_ref().expect("parked operation");
    let configs: Vec<_> = pending.conflicts.iter().map(|c| c.config.clone()).collect();
    assert_eq!(configs, vec!["vim".to_string(), "vim-extras".to_string()]);
}
