use anyhow::Context;

use crate::config::Repo;
use crate::links;
use crate::model::{Baseline, SyncTotals};

use super::super::panels::{LogLevel, StepStatus};
use super::super::views::{ConflictChoice, ConflictView, ViewState};
use super::runner::{OpHandle, OpKind, OpReport};
use super::{App, PendingOp};

impl App {
    /// Front door for every operation. Rejects while one is running, then
    /// routes link-creating kinds through the conflict gate before launch.
    pub(super) fn request_operation(&mut self, kind: OpKind) {
        if self.op_active {
            self.panels
                .output
                .log(LogLevel::Warn, "an operation is already running");
            return;
        }
        let Some(repo) = self.repo.clone() else {
            self.panels
                .output
                .log(LogLevel::Error, "no repository loaded");
            return;
        };

        match kind.link_scope() {
            None => self.launch(kind),
            Some(scope) => {
                let scope = match &kind {
                    OpKind::BulkSync(name) => repo.with_dependents(name),
                    _ => scope,
                };
                match links::detect_conflicts(&repo, &scope) {
                    Ok(conflicts) if conflicts.is_empty() => self.launch(kind),
                    Ok(conflicts) => {
                        self.pending_op = Some(PendingOp {
                            kind,
                            conflicts: conflicts.clone(),
                        });
                        self.push_view(ViewState::Conflict(ConflictView::new(conflicts)));
                    }
                    Err(err) => {
                        self.panels
                            .output
                            .log(LogLevel::Error, format!("conflict scan failed: {err:#}"));
                    }
                }
            }
        }
    }

    /// Conflict view resolved. Cancel drops the parked operation; Backup
    /// and Delete remediate every conflicting file first and resume only
    /// if remediation fully succeeds.
    pub(super) fn resolve_conflicts(&mut self, choice: ConflictChoice) {
        let Some(pending) = self.pending_op.take() else {
            return;
        };
        if choice == ConflictChoice::Cancel {
            self.panels.output.log(
                LogLevel::Info,
                format!("{} cancelled", pending.kind.title()),
            );
            return;
        }
        let Some(repo) = self.repo.clone() else {
            return;
        };

        let stamp = links::now_rfc3339().replace(':', "-");
        let backup_root = repo.backup_root();
        for file in &pending.conflicts {
            let result = match choice {
                ConflictChoice::Backup => links::backup_file(&backup_root, &stamp, &file.path)
                    .map(|dest| format!("backed up {} -> {}", file.path.display(), dest.display())),
                ConflictChoice::Delete => links::remove_file(&file.path)
                    .map(|()| format!("deleted {}", file.path.display())),
                ConflictChoice::Cancel => unreachable!(),
            };
            match result {
                Ok(line) => self.panels.output.log(LogLevel::Info, line),
                Err(err) => {
                    self.panels.output.log(
                        LogLevel::Error,
                        format!("{:#}; {} aborted", err, pending.kind.title()),
                    );
                    return;
                }
            }
        }
        let resolved = pending.conflicts.len();
        self.launch(pending.kind);
        // After launch so the count survives the log reset and opens the
        // resumed operation's log.
        self.panels
            .output
            .log(LogLevel::Info, format!("{resolved} conflicts resolved"));
    }

    fn launch(&mut self, kind: OpKind) {
        let Some(repo) = self.repo.clone() else {
            return;
        };
        match kind.clone() {
            OpKind::Install => self.start_operation(kind, move |h| install_work(&repo, h)),
            OpKind::Sync => {
                self.start_operation(kind, move |h| sync_work(&repo, Vec::new(), h))
            }
            OpKind::SyncSingle(name) => {
                self.start_operation(kind, move |h| sync_work(&repo, vec![name], h))
            }
            OpKind::BulkSync(name) => {
                let scope = repo.with_dependents(&name);
                self.start_operation(kind, move |h| sync_work(&repo, scope, h))
            }
            OpKind::Update => self.start_operation(kind, move |h| update_work(&repo, h)),
            OpKind::Doctor => self.start_operation(kind, move |h| doctor_work(&repo, h)),
            OpKind::ExternalSingle(name) => {
                self.start_operation(kind, move |h| external_single_work(&repo, &name, h))
            }
            OpKind::Uninstall => self.start_operation(kind, move |h| uninstall_work(&repo, h)),
        }
    }
}

/// Symlink the scoped configs and record each success in the baseline.
/// Individual entries may fail without sinking the whole run.
fn sync_work(repo: &Repo, scope: Vec<String>, handle: &OpHandle) -> anyhow::Result<OpReport> {
    let entries: Vec<_> = repo
        .config
        .configs
        .iter()
        .filter(|e| scope.is_empty() || scope.iter().any(|n| n == &e.name))
        .cloned()
        .collect();
    if entries.is_empty() {
        return Ok(OpReport::ok("nothing to sync"));
    }

    let mut baseline = Baseline::load_or_create(&repo.root)?;
    let mut totals = SyncTotals::default();
    for (step, entry) in entries.iter().enumerate() {
        handle.progress(step, format!("sync {}", entry.name));
        match links::sync_entry(repo, entry) {
            Ok(outcome) => {
                totals.record(outcome);
                if let Err(err) = baseline.record(&repo.root, entry) {
                    handle.log(LogLevel::Warn, format!("baseline for {}: {err:#}", entry.name));
                }
                handle.step_done(step, StepStatus::Success, format!("{} linked", entry.name));
            }
            Err(err) => {
                totals.failed += 1;
                handle.step_done(step, StepStatus::Error, format!("{}: {err:#}", entry.name));
            }
        }
    }
    baseline.save(&repo.root).context("save baseline")?;

    Ok(OpReport {
        success: totals.failed == 0,
        summary: totals.summary(),
    })
}

/// Full first-run setup: sync every config, then clone externals.
fn install_work(repo: &Repo, handle: &OpHandle) -> anyhow::Result<OpReport> {
    let sync = sync_work(repo, Vec::new(), handle)?;
    let base = repo.config.configs.len();
    let mut failed = !sync.success;
    let mut cloned = 0usize;
    for (i, dep) in repo.config.external.iter().enumerate() {
        let step = base + i;
        handle.progress(step, format!("clone {}", dep.name));
        match crate::external::clone_or_update(dep) {
            Ok(line) => {
                cloned += 1;
                handle.step_done(step, StepStatus::Success, line);
            }
            Err(err) => {
                if dep.optional {
                    handle.step_done(step, StepStatus::Skipped, format!("{}: {err:#}", dep.name));
                } else {
                    failed = true;
                    handle.step_done(step, StepStatus::Error, format!("{}: {err:#}", dep.name));
                }
            }
        }
    }
    Ok(OpReport {
        success: !failed,
        summary: format!("{}; {} externals ready", sync.summary, cloned),
    })
}

fn update_work(repo: &Repo, handle: &OpHandle) -> anyhow::Result<OpReport> {
    if repo.config.external.is_empty() {
        return Ok(OpReport::ok("no external dependencies declared"));
    }
    let mut failed = 0usize;
    for (step, dep) in repo.config.external.iter().enumerate() {
        handle.progress(step, format!("update {}", dep.name));
        match crate::external::clone_or_update(dep) {
            Ok(line) => handle.step_done(step, StepStatus::Success, line),
            Err(err) => {
                failed += 1;
                handle.step_done(step, StepStatus::Error, format!("{}: {err:#}", dep.name));
            }
        }
    }
    let total = repo.config.external.len();
    Ok(OpReport {
        success: failed == 0,
        summary: format!("{}/{} externals updated", total - failed, total),
    })
}

/// Runs the health checks off-thread and hands the results to the Health
/// panel through the same channel the progress messages use.
fn doctor_work(repo: &Repo, handle: &OpHandle) -> anyhow::Result<OpReport> {
    let checks = crate::doctor::run_checks(repo);
    let mut failing = 0usize;
    for (step, check) in checks.iter().enumerate() {
        let status = match check.status {
            crate::model::CheckStatus::Pass => StepStatus::Success,
            crate::model::CheckStatus::Warn => StepStatus::Warning,
            crate::model::CheckStatus::Fail => {
                failing += 1;
                StepStatus::Error
            }
            crate::model::CheckStatus::Skip => StepStatus::Skipped,
        };
        handle.step_done(step, status, format!("{}: {}", check.name, check.detail));
    }
    let total = checks.len();
    handle.send(super::UiMsg::HealthLoaded(checks));
    Ok(OpReport {
        success: failing == 0,
        summary: format!("{}/{} checks healthy", total - failing, total),
    })
}

fn external_single_work(repo: &Repo, name: &str, handle: &OpHandle) -> anyhow::Result<OpReport> {
    let dep = repo
        .config
        .external
        .iter()
        .find(|d| d.name == name)
        .with_context(|| format!("unknown external dependency {name:?}"))?;
    handle.progress(0, format!("clone {}", dep.name));
    let line = crate::external::clone_or_update(dep)?;
    handle.step_done(0, StepStatus::Success, line.clone());
    Ok(OpReport::ok(line))
}

fn uninstall_work(repo: &Repo, handle: &OpHandle) -> anyhow::Result<OpReport> {
    handle.progress(0, "removing managed links");
    let removed = links::uninstall(repo)?;
    handle.step_done(0, StepStatus::Success, format!("{removed} links removed"));
    Ok(OpReport::ok(format!("{removed} links removed")))
}

#[cfg(test)]
#[path = "../../tests/tui_shell/gate_tests.rs"]
mod tests;
