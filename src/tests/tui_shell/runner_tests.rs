use super::*;

use std::sync::mpsc;
use std::time::Duration;

use crate::tui::TuiRunOptions;

fn test_app() -> App {
    let mut app = App::load(&TuiRunOptions {
        dir: Some(std::env::temp_dir()),
        trace: None,
    });
    // Operation flow under test starts from the dashboard, repo or not.
    app.view = ViewState::Dashboard;
    app
}

/// Pull operation messages off the channel until Done shows up.
fn collect_until_done(app: &App) -> Vec<OpMessage> {
    let mut out = Vec::new();
    loop {
        let msg = app
            .msg_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should report back");
        if let UiMsg::Op(op) = msg {
            let is_done = matches!(op, OpMessage::Done { .. });
            out.push(op);
            if is_done {
                return out;
            }
        }
    }
}

#[test]
fn successful_work_reports_done_once() {
    let mut app = test_app();
    app.start_operation(OpKind::Sync, |handle| {
        handle.log(LogLevel::Info, "starting");
        handle.progress(0, "step one");
        handle.step_done(0, StepStatus::Success, "step one done");
        Ok(OpReport::ok("all good"))
    });
    assert!(app.op_active);
    assert_eq!(app.view.id(), ViewId::Operation);

    let msgs = collect_until_done(&app);
    match msgs.last() {
        Some(OpMessage::Done { success, summary }) => {
            assert!(success);
            assert_eq!(summary, "all good");
        }
        _ => panic!("last message must be Done"),
    }
    assert_eq!(
        msgs.iter()
            .filter(|m| matches!(m, OpMessage::Done { .. }))
            .count(),
        1
    );

    // No second Done ever arrives.
    assert!(app.msg_rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn worker_error_becomes_failed_done() {
    let mut app = test_app();
    app.start_operation(OpKind::Doctor, |_| anyhow::bail!("disk on fire"));

    let msgs = collect_until_done(&app);
    match msgs.last() {
        Some(OpMessage::Done { success, summary }) => {
            assert!(!success);
            assert!(summary.contains("disk on fire"));
        }
        _ => panic!("last message must be Done"),
    }
}

#[test]
fn panicking_worker_still_reports_done() {
    let mut app = test_app();
    app.start_operation(OpKind::Update, |handle| {
        handle.log(LogLevel::Info, "about to go wrong");
        panic!("index out of range");
    });

    let msgs = collect_until_done(&app);
    match msgs.last() {
        Some(OpMessage::Done { success, summary }) => {
            assert!(!success);
            assert!(summary.contains("index out of range"));
        }
        _ => panic!("last message must be Done"),
    }
}

#[test]
fn second_operation_is_rejected_while_one_runs() {
    let mut app = test_app();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    app.start_operation(OpKind::Sync, move |_| {
        release_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("release signal");
        Ok(OpReport::ok("first finished"))
    });

    let log_len = app.panels.output.entries.len();
    app.start_operation(OpKind::Doctor, |_| Ok(OpReport::ok("second")));
    assert_eq!(app.current_op, Some(OpKind::Sync));
    assert!(
        app.panels.output.entries[log_len..]
            .iter()
            .any(|e| e.text.contains("already running"))
    );

    release_tx.send(()).expect("release");
    let msgs = collect_until_done(&app);
    assert_eq!(
        msgs.iter()
            .filter(|m| matches!(m, OpMessage::Done { .. }))
            .count(),
        1
    );
}

#[test]
fn done_handler_clears_the_gate_and_restores_the_view() {
    let mut app = test_app();
    app.start_operation(OpKind::Sync, |_| Ok(OpReport::ok("fine")));
    for op in collect_until_done(&app) {
        app.handle_msg(UiMsg::Op(op));
    }
    assert!(!app.op_active);
    assert_eq!(app.current_op, None);
    assert_eq!(app.view.id(), ViewId::Dashboard);
}

#[test]
fn link_scope_covers_only_link_creating_kinds() {
    assert_eq!(OpKind::Sync.link_scope(), Some(Vec::new()));
    assert_eq!(OpKind::Install.link_scope(), Some(Vec::new()));
    assert_eq!(
        OpKind::SyncSingle("vim".to_string()).link_scope(),
        Some(vec!["vim".to_string()])
    );
    assert_eq!(OpKind::Doctor.link_scope(), None);
    assert_eq!(OpKind::Update.link_scope(), None);
    assert_eq!(OpKind::Uninstall.link_scope(), None);
}
