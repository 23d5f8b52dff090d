use std::path::PathBuf;

use anyhow::Result;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    /// Start discovery here instead of the current directory.
    pub dir: Option<PathBuf>,
    /// Append a JSONL session trace to this file.
    pub trace: Option<PathBuf>,
}

/// What the caller should do after the interactive session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Sync,
    SyncConfig,
    BulkSync,
    Doctor,
    Install,
    MachineConfig,
    External,
    Uninstall,
    Update,
    List,
    Init,
    Quit,
}

#[derive(Clone, Debug)]
pub struct UiResult {
    pub action: Action,
    pub config_name: Option<String>,
    pub config_names: Vec<String>,
    pub selected_config: Option<String>,
    pub filter_text: Option<String>,
}

impl UiResult {
    pub fn action(action: Action) -> Self {
        Self {
            action,
            config_name: None,
            config_names: Vec::new(),
            selected_config: None,
            filter_text: None,
        }
    }

    pub fn quit() -> Self {
        Self::action(Action::Quit)
    }
}

pub fn run(opts: TuiRunOptions) -> Result<UiResult> {
    crate::tui_shell::run(opts)
}
