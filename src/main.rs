use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use plait::config::Repo;
use plait::model::Baseline;
use plait::tui::{Action, TuiRunOptions, UiResult};

#[derive(Parser)]
#[command(name = "plait")]
#[command(about = "Dotfiles and machine-config manager", long_about = None)]
struct Cli {
    /// Start repository discovery here instead of the current directory
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Append a JSONL session trace to this file (interactive mode)
    #[arg(long, global = true)]
    trace: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter plait.yaml
    Init {
        /// Overwrite an existing plait.yaml
        #[arg(long)]
        force: bool,
        /// Directory to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Symlink every config and clone external dependencies
    Install,

    /// Symlink configs (all, or one by name)
    Sync {
        /// Config name; omit to sync everything
        name: Option<String>,
        /// Also sync configs that depend on the named one
        #[arg(long)]
        bulk: bool,
    },

    /// Run health checks
    Doctor,

    /// Clone or fast-forward external dependencies
    Update,

    /// Show external dependency status
    External,

    /// Manage machine-local values and rendered templates
    Machine {
        #[command(subcommand)]
        command: Option<MachineCommands>,
    },

    /// List managed configs
    List,

    /// Remove every managed symlink
    Uninstall {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MachineCommands {
    /// Show machine setting status
    List,
    /// Set a machine-local value
    Set { key: String, value: String },
    /// Render a setting's template to its target
    Render { key: String },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let start = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("get current dir")?,
    };

    let Some(command) = cli.command else {
        // No subcommand: interactive dashboard. It may hand an action back
        // for non-interactive follow-up (e.g. exiting the config list to
        // the shell).
        let result = plait::tui::run(TuiRunOptions {
            dir: cli.dir.clone(),
            trace: cli.trace.clone(),
        })?;
        return dispatch_ui_result(&start, result);
    };

    match command {
        Commands::Init { force, path } => {
            let root = path.unwrap_or(start);
            Repo::init(&root, force)?;
            println!("Initialized {}", root.join(plait::config::CONFIG_FILE).display());
        }
        Commands::Install => {
            let repo = Repo::discover(&start)?;
            cmd_sync(&repo, None, false)?;
            for dep in &repo.config.external {
                match plait::external::clone_or_update(dep) {
                    Ok(line) => println!("{line}"),
                    Err(err) if dep.optional => println!("skipped {}: {err:#}", dep.name),
                    Err(err) => return Err(err),
                }
            }
        }
        Commands::Sync { name, bulk } => {
            let repo = Repo::discover(&start)?;
            cmd_sync(&repo, name.as_deref(), bulk)?;
        }
        Commands::Doctor => {
            let repo = Repo::discover(&start)?;
            cmd_doctor(&repo)?;
        }
        Commands::Update => {
            let repo = Repo::discover(&start)?;
            for dep in &repo.config.external {
                println!("{}", plait::external::clone_or_update(dep)?);
            }
        }
        Commands::External => {
            let repo = Repo::discover(&start)?;
            for status in plait::external::statuses(&repo.config.external) {
                println!("{:10} {:20} {}", status.state.label(), status.name, status.detail);
            }
        }
        Commands::Machine { command } => {
            let repo = Repo::discover(&start)?;
            cmd_machine(&repo, command)?;
        }
        Commands::List => {
            let repo = Repo::discover(&start)?;
            cmd_list(&repo)?;
        }
        Commands::Uninstall { yes } => {
            let repo = Repo::discover(&start)?;
            if !yes {
                anyhow::bail!("pass --yes to remove all managed symlinks");
            }
            let removed = plait::links::uninstall(&repo)?;
            println!("{removed} links removed");
        }
    }

    Ok(())
}

/// Actions the interactive session defers to the CLI after the terminal is
/// restored.
fn dispatch_ui_result(start: &std::path::Path, result: UiResult) -> Result<()> {
    match result.action {
        Action::Quit => Ok(()),
        Action::List => {
            if let Some(filter) = &result.filter_text {
                println!("filter: {filter}");
            }
            for name in &result.config_names {
                println!("{name}");
            }
            Ok(())
        }
        Action::SyncConfig => {
            let repo = Repo::discover(start)?;
            cmd_sync(&repo, result.config_name.as_deref(), false)
        }
        Action::Sync => {
            let repo = Repo::discover(start)?;
            cmd_sync(&repo, None, false)
        }
        Action::BulkSync => {
            let repo = Repo::discover(start)?;
            cmd_sync(&repo, result.config_name.as_deref(), true)
        }
        Action::Doctor => {
            let repo = Repo::discover(start)?;
            cmd_doctor(&repo)
        }
        Action::Install | Action::Update | Action::External | Action::MachineConfig
        | Action::Uninstall | Action::Init => {
            // These complete inside the dashboard; nothing left to do here.
            Ok(())
        }
    }
}

fn cmd_sync(repo: &Repo, name: Option<&str>, bulk: bool) -> Result<()> {
    if let Some(n) = name {
        anyhow::ensure!(repo.entry(n).is_some(), "unknown config {n:?}");
    }
    let scope: Vec<String> = match name {
        None => Vec::new(),
        Some(n) if bulk => repo.with_dependents(n),
        Some(n) => vec![n.to_string()],
    };

    let conflicts = plait::links::detect_conflicts(repo, &scope)?;
    if !conflicts.is_empty() {
        for c in &conflicts {
            eprintln!("conflict: {} ({})", c.path.display(), c.config);
        }
        anyhow::bail!("unresolved conflicts; move the files aside and retry");
    }

    let mut baseline = Baseline::load_or_create(&repo.root)?;
    let mut totals = plait::model::SyncTotals::default();
    for entry in &repo.config.configs {
        if !scope.is_empty() && !scope.iter().any(|n| n == &entry.name) {
            continue;
        }
        match plait::links::sync_entry(repo, entry) {
            Ok(outcome) => {
                totals.record(outcome);
                baseline.record(&repo.root, entry)?;
                println!("linked {}", entry.name);
            }
            Err(err) => {
                totals.failed += 1;
                eprintln!("failed {}: {err:#}", entry.name);
            }
        }
    }
    baseline.save(&repo.root)?;
    println!("{}", totals.summary());
    if totals.failed > 0 {
        anyhow::bail!("{} configs failed to sync", totals.failed);
    }
    Ok(())
}

fn cmd_doctor(repo: &Repo) -> Result<()> {
    let checks = plait::doctor::run_checks(repo);
    let mut failing = 0usize;
    for check in &checks {
        if check.status == plait::model::CheckStatus::Fail {
            failing += 1;
        }
        println!("{:5} {:10} {}", check.status.glyph(), check.name, check.detail);
    }
    if failing > 0 {
        anyhow::bail!("{failing} checks failing");
    }
    Ok(())
}

fn cmd_list(repo: &Repo) -> Result<()> {
    let baseline = Baseline::load_or_create(&repo.root)?;
    for status in plait::links::link_statuses(repo, &baseline) {
        println!(
            "{:8} {:20} {}",
            status.state.label(),
            status.name,
            status.target.display()
        );
    }
    Ok(())
}

fn cmd_machine(repo: &Repo, command: Option<MachineCommands>) -> Result<()> {
    let mut values = plait::machine::load_values(&repo.root)?;
    match command.unwrap_or(MachineCommands::List) {
        MachineCommands::List => {
            for status in plait::machine::statuses(repo, &values) {
                println!("{:10} {:15} {}", status.state.label(), status.key, status.detail);
            }
        }
        MachineCommands::Set { key, value } => {
            anyhow::ensure!(
                repo.config.machine.iter().any(|p| p.key == key),
                "unknown machine key {key:?}"
            );
            values.insert(key.clone(), value);
            plait::machine::save_values(&repo.root, &values)?;
            println!("set {key}");
        }
        MachineCommands::Render { key } => {
            let prompt = repo
                .config
                .machine
                .iter()
                .find(|p| p.key == key)
                .with_context(|| format!("unknown machine key {key:?}"))?;
            plait::machine::render_write(repo, prompt, &values)?;
            println!("rendered {key}");
        }
    }
    Ok(())
}
