use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Health of one managed symlink, as reported by the link engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    /// Target is a symlink pointing at the config's source.
    Linked,
    /// Target does not exist yet.
    Missing,
    /// Linked, but the source content no longer matches the sync baseline.
    Drifted,
    /// Something else occupies the target path.
    Conflicted,
}

impl LinkState {
    pub fn label(self) -> &'static str {
        match self {
            LinkState::Linked => "linked",
            LinkState::Missing => "missing",
            LinkState::Drifted => "drifted",
            LinkState::Conflicted => "conflict",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LinkStatus {
    pub name: String,
    pub state: LinkState,
    pub target: PathBuf,
    pub detail: String,
}

/// A filesystem path that blocks a symlink operation: the target exists and
/// is not a link back to the config's source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictFile {
    pub config: String,
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Replaced,
    Unchanged,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SyncTotals {
    pub created: usize,
    pub replaced: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl SyncTotals {
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created => self.created += 1,
            SyncOutcome::Replaced => self.replaced += 1,
            SyncOutcome::Unchanged => self.unchanged += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} created, {} replaced, {} unchanged, {} failed",
            self.created, self.replaced, self.unchanged, self.failed
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

impl CheckStatus {
    pub fn glyph(self) -> &'static str {
        match self {
            CheckStatus::Pass => "ok",
            CheckStatus::Warn => "warn",
            CheckStatus::Fail => "fail",
            CheckStatus::Skip => "skip",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExternalState {
    Installed,
    Missing,
    Skipped,
}

impl ExternalState {
    pub fn label(self) -> &'static str {
        match self {
            ExternalState::Installed => "installed",
            ExternalState::Missing => "missing",
            ExternalState::Skipped => "skipped",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExternalStatus {
    pub name: String,
    pub state: ExternalState,
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineState {
    Configured,
    Missing,
    Error,
}

impl MachineState {
    pub fn label(self) -> &'static str {
        match self {
            MachineState::Configured => "configured",
            MachineState::Missing => "missing",
            MachineState::Error => "error",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MachineStatus {
    pub key: String,
    pub state: MachineState,
    pub detail: String,
}

/// One synced link as recorded in the baseline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkRecord {
    pub target: String,
    pub source_hash: String,
}

/// Persisted sync baseline, written after every mutating operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Baseline {
    pub version: u32,
    pub updated_at: String,
    #[serde(default)]
    pub links: BTreeMap<String, LinkRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct DriftSummary {
    pub drifted: Vec<String>,
    pub clean: usize,
    pub untracked: usize,
}
