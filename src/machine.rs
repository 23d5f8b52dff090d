use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::config::{MachinePrompt, Repo};
use crate::links::expand_target;
use crate::model::{MachineState, MachineStatus};

fn values_path(root: &Path) -> std::path::PathBuf {
    root.join(crate::state::STATE_DIR).join("machine.json")
}

/// Machine-local values, keyed by prompt key. Kept out of the dotfiles repo
/// proper so they never sync across machines.
pub fn load_values(root: &Path) -> Result<BTreeMap<String, String>> {
    let path = values_path(root);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub fn save_values(root: &Path, values: &BTreeMap<String, String>) -> Result<()> {
    let path = values_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(values).context("serialize machine values")?;
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn status(
    repo: &Repo,
    prompt: &MachinePrompt,
    values: &BTreeMap<String, String>,
) -> MachineStatus {
    let template = repo.root.join(&prompt.template);
    if !template.is_file() {
        return MachineStatus {
            key: prompt.key.clone(),
            state: MachineState::Error,
            detail: format!("template {} missing", prompt.template.display()),
        };
    }
    if !values.contains_key(&prompt.key) {
        return MachineStatus {
            key: prompt.key.clone(),
            state: MachineState::Missing,
            detail: prompt.prompt.clone(),
        };
    }
    match expand_target(&prompt.target) {
        Ok(target) if target.exists() => MachineStatus {
            key: prompt.key.clone(),
            state: MachineState::Configured,
            detail: target.display().to_string(),
        },
        Ok(_) => MachineStatus {
            key: prompt.key.clone(),
            state: MachineState::Missing,
            detail: "value set but not rendered".to_string(),
        },
        Err(err) => MachineStatus {
            key: prompt.key.clone(),
            state: MachineState::Error,
            detail: format!("{err:#}"),
        },
    }
}

pub fn statuses(repo: &Repo, values: &BTreeMap<String, String>) -> Vec<MachineStatus> {
    repo.config
        .machine
        .iter()
        .map(|p| status(repo, p, values))
        .collect()
}

/// Substitute `{{key}}` placeholders. Unknown placeholders are errors so a
/// half-rendered file never reaches the target.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(anyhow!("unterminated placeholder"));
        };
        let key = after[..end].trim();
        let value = values
            .get(key)
            .ok_or_else(|| anyhow!("no value for placeholder {key:?}"))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

pub fn render_write(
    repo: &Repo,
    prompt: &MachinePrompt,
    values: &BTreeMap<String, String>,
) -> Result<()> {
    let template_path = repo.root.join(&prompt.template);
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("read {}", template_path.display()))?;
    let rendered = render(&template, values)
        .with_context(|| format!("render template for {}", prompt.key))?;
    let target = expand_target(&prompt.target)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&target, rendered).with_context(|| format!("write {}", target.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/machine_tests.rs"]
mod tests;
