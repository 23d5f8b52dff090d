use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::sync::mpsc::{Receiver, Sender, channel};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Repo;
use crate::model::Baseline;
use crate::tui::{Action, TuiRunOptions, UiResult};

use super::focus::FocusManager;
use super::keymap::KeyMap;
use super::panels::Panels;
use super::views::ViewState;

mod event_loop;
mod gate;
mod keys;
mod nav;
mod refresh;
mod render;
mod runner;
mod trace;

pub(super) use runner::{OpHandle, OpKind, OpMessage, OpReport, UiMsg};

pub(super) fn run(opts: TuiRunOptions) -> Result<UiResult> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("interactive mode requires a terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::load(&opts);
    app.enable_trace(opts.trace.clone());
    app.refresh_all();
    let res = event_loop::run_loop(&mut terminal, &mut app);
    app.trace_session_end();

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res.map(|()| app.result.unwrap_or_else(UiResult::quit))
}

/// An operation that passed admission but is parked behind unresolved
/// conflicts. Launched verbatim once the user remediates.
pub(super) struct PendingOp {
    pub(super) kind: OpKind,
    pub(super) conflicts: Vec<crate::model::ConflictFile>,
}

pub(super) struct App {
    repo: Option<Repo>,
    repo_err: Option<String>,
    baseline: Baseline,
    machine_values: BTreeMap<String, String>,

    panels: Panels,
    focus: FocusManager,
    keymap: KeyMap,

    view: ViewState,
    view_stack: Vec<ViewState>,

    // One operation at a time. Cleared only by the Done handler, so a
    // worker that is still draining messages keeps the gate shut.
    op_active: bool,
    current_op: Option<OpKind>,
    pending_op: Option<PendingOp>,

    msg_tx: Sender<UiMsg>,
    msg_rx: Receiver<UiMsg>,

    trace: Option<trace::TraceWriter>,

    result: Option<UiResult>,
    quit: bool,
}

impl App {
    fn load(opts: &TuiRunOptions) -> Self {
        let start = opts
            .dir
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let (repo, repo_err) = match Repo::discover(&start) {
            Ok(repo) => (Some(repo), None),
            Err(err) => (None, Some(format!("{err:#}"))),
        };

        let baseline = repo
            .as_ref()
            .and_then(|r| Baseline::load_or_create(&r.root).ok())
            .unwrap_or_else(|| Baseline {
                version: 1,
                updated_at: crate::links::now_rfc3339(),
                links: BTreeMap::new(),
            });
        let machine_values = repo
            .as_ref()
            .and_then(|r| crate::machine::load_values(&r.root).ok())
            .unwrap_or_default();

        let view = if repo.is_some() {
            ViewState::Dashboard
        } else {
            ViewState::NoConfig
        };

        let (msg_tx, msg_rx) = channel();
        Self {
            repo,
            repo_err,
            baseline,
            machine_values,
            panels: Panels::new(),
            focus: FocusManager::new(),
            keymap: KeyMap::default(),
            view,
            view_stack: Vec::new(),
            op_active: false,
            current_op: None,
            pending_op: None,
            msg_tx,
            msg_rx,
            trace: None,
            result: None,
            quit: false,
        }
    }

    fn finish(&mut self, result: UiResult) {
        self.result = Some(result);
        self.quit = true;
    }

    fn finish_quit(&mut self) {
        self.finish(UiResult::action(Action::Quit));
    }
}
