use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};

use crate::config::ExternalDep;
use crate::links::expand_target;
use crate::model::{ExternalState, ExternalStatus};

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    let output = cmd
        .output()
        .with_context(|| format!("run git {}", args.join(" ")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn status(dep: &ExternalDep) -> ExternalStatus {
    let target = match expand_target(&dep.target) {
        Ok(t) => t,
        Err(err) => {
            return ExternalStatus {
                name: dep.name.clone(),
                state: ExternalState::Missing,
                detail: format!("{err:#}"),
            };
        }
    };

    if target.join(".git").is_dir() {
        return ExternalStatus {
            name: dep.name.clone(),
            state: ExternalState::Installed,
            detail: target.display().to_string(),
        };
    }
    if dep.optional && !git_available() {
        return ExternalStatus {
            name: dep.name.clone(),
            state: ExternalState::Skipped,
            detail: "optional, git not available".to_string(),
        };
    }
    ExternalStatus {
        name: dep.name.clone(),
        state: ExternalState::Missing,
        detail: format!("not cloned ({})", dep.repo),
    }
}

pub fn statuses(deps: &[ExternalDep]) -> Vec<ExternalStatus> {
    deps.iter().map(status).collect()
}

/// Clone the dependency, or fast-forward it when already present.
/// Returns a one-line summary for the operation log.
pub fn clone_or_update(dep: &ExternalDep) -> Result<String> {
    let target = expand_target(&dep.target)?;
    if target.join(".git").is_dir() {
        git(&["pull", "--ff-only"], Some(&target))
            .with_context(|| format!("update {}", dep.name))?;
        return Ok(format!("updated {}", dep.name));
    }
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let target_str = target
        .to_str()
        .ok_or_else(|| anyhow!("non-utf8 target path for {}", dep.name))?;
    git(&["clone", "--depth", "1", &dep.repo, target_str], None)
        .with_context(|| format!("clone {}", dep.name))?;
    Ok(format!("cloned {}", dep.name))
}
