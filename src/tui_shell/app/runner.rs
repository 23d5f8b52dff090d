use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::Sender;
use std::thread;

use anyhow::Result;
use serde_json::json;

use crate::model::{CheckResult, ExternalStatus};

use super::super::panels::{LogLevel, StepStatus};
use super::super::views::{ViewId, ViewState};
use super::App;

/// Everything the dispatch loop can receive from background threads.
pub(in crate::tui_shell) enum UiMsg {
    Op(OpMessage),
    HealthLoaded(Vec<CheckResult>),
    ExternalLoaded(Vec<ExternalStatus>),
}

/// The worker protocol. Workers emit any number of Log/Progress/StepDone
/// messages; the runner itself emits exactly one Done per operation, even
/// when the work panics.
pub(in crate::tui_shell) enum OpMessage {
    Log(LogLevel, String),
    Progress { step: usize, detail: String },
    StepDone { step: usize, status: StepStatus, detail: String },
    Done { success: bool, summary: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum OpKind {
    Install,
    Sync,
    SyncSingle(String),
    BulkSync(String),
    Update,
    Doctor,
    ExternalSingle(String),
    Uninstall,
}

impl OpKind {
    pub(in crate::tui_shell) fn title(&self) -> String {
        match self {
            OpKind::Install => "install".to_string(),
            OpKind::Sync => "sync all".to_string(),
            OpKind::SyncSingle(name) => format!("sync {name}"),
            OpKind::BulkSync(name) => format!("sync {name} + dependents"),
            OpKind::Update => "update externals".to_string(),
            OpKind::Doctor => "doctor".to_string(),
            OpKind::ExternalSingle(name) => format!("clone {name}"),
            OpKind::Uninstall => "uninstall".to_string(),
        }
    }

    /// Config names whose link targets the operation will touch. Empty
    /// means every config; None means the operation never creates links
    /// and skips the conflict gate entirely.
    pub(in crate::tui_shell) fn link_scope(&self) -> Option<Vec<String>> {
        match self {
            OpKind::Install | OpKind::Sync => Some(Vec::new()),
            OpKind::SyncSingle(name) => Some(vec![name.clone()]),
            // Expanded to dependents by the gate, which has the repo.
            OpKind::BulkSync(name) => Some(vec![name.clone()]),
            OpKind::Update | OpKind::Doctor | OpKind::ExternalSingle(_) | OpKind::Uninstall => {
                None
            }
        }
    }
}

/// What a worker reports back on orderly completion. `success: false` with
/// an Ok return carries partial-failure summaries (some links synced, some
/// failed) without collapsing them into a single error string.
pub(in crate::tui_shell) struct OpReport {
    pub(in crate::tui_shell) success: bool,
    pub(in crate::tui_shell) summary: String,
}

impl OpReport {
    pub(in crate::tui_shell) fn ok(summary: impl Into<String>) -> Self {
        Self {
            success: true,
            summary: summary.into(),
        }
    }
}

/// Handed to the work closure; the only channel a worker has back to the
/// UI. Send failures mean the UI is gone, so they are ignored.
pub(in crate::tui_shell) struct OpHandle {
    tx: Sender<UiMsg>,
}

impl OpHandle {
    pub(in crate::tui_shell) fn log(&self, level: LogLevel, text: impl Into<String>) {
        let _ = self.tx.send(UiMsg::Op(OpMessage::Log(level, text.into())));
    }

    pub(in crate::tui_shell) fn progress(&self, step: usize, detail: impl Into<String>) {
        let _ = self.tx.send(UiMsg::Op(OpMessage::Progress {
            step,
            detail: detail.into(),
        }));
    }

    pub(in crate::tui_shell) fn step_done(
        &self,
        step: usize,
        status: StepStatus,
        detail: impl Into<String>,
    ) {
        let _ = self.tx.send(UiMsg::Op(OpMessage::StepDone {
            step,
            status,
            detail: detail.into(),
        }));
    }

    pub(in crate::tui_shell) fn send(&self, msg: UiMsg) {
        let _ = self.tx.send(msg);
    }
}

fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl App {
    /// Admission control plus worker spawn. Exactly one Done message is
    /// produced per started operation: the runner flattens Ok, Err, and
    /// panic into it.
    pub(super) fn start_operation<F>(&mut self, kind: OpKind, work: F)
    where
        F: FnOnce(&OpHandle) -> Result<OpReport> + Send + 'static,
    {
        if self.op_active {
            self.panels
                .output
                .log(LogLevel::Warn, "an operation is already running");
            return;
        }
        self.op_active = true;
        self.current_op = Some(kind.clone());
        self.panels.output.begin(&kind.title());
        self.trace_event("op_start", json!({ "op": kind.title() }));
        if self.view.id() != ViewId::Operation {
            self.push_view(ViewState::Operation);
        }

        let tx = self.msg_tx.clone();
        thread::spawn(move || {
            let handle = OpHandle { tx: tx.clone() };
            let outcome = catch_unwind(AssertUnwindSafe(|| work(&handle)));
            let done = match outcome {
                Ok(Ok(report)) => OpMessage::Done {
                    success: report.success,
                    summary: report.summary,
                },
                Ok(Err(err)) => OpMessage::Done {
                    success: false,
                    summary: format!("{err:#}"),
                },
                Err(payload) => OpMessage::Done {
                    success: false,
                    summary: format!("operation panicked: {}", panic_text(payload)),
                },
            };
            let _ = tx.send(UiMsg::Op(done));
        });
    }

    pub(super) fn handle_msg(&mut self, msg: UiMsg) {
        match msg {
            UiMsg::Op(op) => self.handle_op_message(op),
            UiMsg::HealthLoaded(checks) => {
                self.panels.health.set_checks(checks);
                self.refresh_details();
            }
            UiMsg::ExternalLoaded(items) => {
                self.panels.summary.externals_installed = items
                    .iter()
                    .filter(|s| s.state == crate::model::ExternalState::Installed)
                    .count();
                self.panels.summary.externals_total = items.len();
                self.panels.external.set_items(items);
                self.refresh_details();
            }
        }
    }

    fn handle_op_message(&mut self, msg: OpMessage) {
        match msg {
            OpMessage::Log(level, text) => self.panels.output.log(level, text),
            OpMessage::Progress { step, detail } => self.panels.output.progress(step, detail),
            OpMessage::StepDone {
                step,
                status,
                detail,
            } => self.panels.output.complete_step(step, status, detail),
            OpMessage::Done { success, summary } => {
                let finished = self.current_op.take();
                self.op_active = false;
                let level = if success {
                    LogLevel::Success
                } else {
                    LogLevel::Error
                };
                self.panels.output.log(level, summary.clone());
                self.trace_event(
                    "op_done",
                    json!({
                        "op": finished.as_ref().map(OpKind::title),
                        "success": success,
                        "summary": summary,
                    }),
                );
                if self.view.id() == ViewId::Operation {
                    self.pop_view();
                }
                self.refresh_links();
                match finished {
                    Some(OpKind::ExternalSingle(_) | OpKind::Update | OpKind::Install)
                        if success =>
                    {
                        self.refresh_external();
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/runner_tests.rs"]
mod tests;
