use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "plait.yaml";

/// One managed config: a source path inside the repo linked to a target path
/// in the user's home (or an absolute path).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub name: String,
    pub source: PathBuf,
    pub target: PathBuf,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// External git dependency cloned next to the managed configs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExternalDep {
    pub name: String,
    pub repo: String,
    pub target: PathBuf,
    #[serde(default)]
    pub optional: bool,
}

/// A machine-local setting rendered from a template into a target file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachinePrompt {
    pub key: String,
    #[serde(default)]
    pub prompt: String,
    pub template: PathBuf,
    pub target: PathBuf,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub configs: Vec<ConfigEntry>,
    #[serde(default)]
    pub external: Vec<ExternalDep>,
    #[serde(default)]
    pub machine: Vec<MachinePrompt>,
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// A discovered dotfiles repository: its root plus the parsed config.
#[derive(Clone, Debug)]
pub struct Repo {
    pub root: PathBuf,
    pub config: Config,
}

impl Repo {
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        let mut config: Config =
            serde_yaml::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
        // Repo-wide ignore patterns apply to every config's source walk.
        if !config.ignore.is_empty() {
            let global = config.ignore.clone();
            for entry in &mut config.configs {
                entry.ignore.extend(global.iter().cloned());
            }
        }
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if dir.join(CONFIG_FILE).is_file() {
                return Self::open(dir);
            }
        }
        Err(anyhow!("No {} found (run `plait init`)", CONFIG_FILE))
    }

    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.exists() && !force {
            return Err(anyhow!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ));
        }
        fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;
        fs::write(&path, STARTER_CONFIG).with_context(|| format!("write {}", path.display()))?;
        Self::open(root)
    }

    pub fn backup_root(&self) -> PathBuf {
        match &self.config.backup_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.root.join(dir),
            None => self.root.join(".plait/backups"),
        }
    }

    pub fn entry(&self, name: &str) -> Option<&ConfigEntry> {
        self.config.configs.iter().find(|e| e.name == name)
    }

    /// `name` plus every config that names it in `depends_on`. Flat name
    /// references only; unknown names are kept so callers can surface them.
    pub fn with_dependents(&self, name: &str) -> Vec<String> {
        let mut out = vec![name.to_string()];
        for entry in &self.config.configs {
            if entry.depends_on.iter().any(|d| d == name) && !out.contains(&entry.name) {
                out.push(entry.name.clone());
            }
        }
        out
    }
}

const STARTER_CONFIG: &str = "\
# plait configuration
#
# configs:
#   - name: vim
#     source: vim            # directory or file inside this repo
#     target: ~/.config/nvim # symlink created here
#
# external:
#   - name: tpm
#     repo: https://github.com/tmux-plugins/tpm
#     target: ~/.tmux/plugins/tpm
#
# machine:
#   - key: email
#     prompt: Git email for this machine
#     template: templates/gitconfig.local
#     target: ~/.gitconfig.local

configs: []
external: []
machine: []
";

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
