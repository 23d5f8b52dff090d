use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::{ConfigEntry, Repo};
use crate::model::{Baseline, ConflictFile, LinkState, LinkStatus, SyncOutcome};

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Expand a leading `~` against $HOME. Absolute paths pass through; other
/// relative paths resolve against the home directory as well.
pub fn expand_target(target: &Path) -> Result<PathBuf> {
    if target.is_absolute() {
        return Ok(target.to_path_buf());
    }
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("HOME is not set"))?;
    let mut components = target.components();
    match components.next() {
        Some(c) if c.as_os_str() == "~" => Ok(home.join(components.as_path())),
        _ => Ok(home.join(target)),
    }
}

#[cfg(unix)]
fn make_symlink(source: &Path, target: &Path) -> Result<()> {
    std::os::unix::fs::symlink(source, target)
        .with_context(|| format!("symlink {} -> {}", target.display(), source.display()))
}

#[cfg(not(unix))]
fn make_symlink(_source: &Path, _target: &Path) -> Result<()> {
    Err(anyhow!("symlinks are only supported on unix"))
}

/// Status of one managed link, drift-checked against the baseline when a
/// record for it exists.
pub fn link_status(repo: &Repo, entry: &ConfigEntry, baseline: &Baseline) -> LinkStatus {
    let source = repo.root.join(&entry.source);
    let target = match expand_target(&entry.target) {
        Ok(t) => t,
        Err(err) => {
            return LinkStatus {
                name: entry.name.clone(),
                state: LinkState::Conflicted,
                target: entry.target.clone(),
                detail: format!("{err:#}"),
            };
        }
    };

    let meta = fs::symlink_metadata(&target);
    let state = match meta {
        Err(_) => LinkState::Missing,
        Ok(meta) if meta.file_type().is_symlink() => match fs::read_link(&target) {
            Ok(dest) if dest == source => drift_state(repo, entry, baseline),
            _ => LinkState::Conflicted,
        },
        Ok(_) => LinkState::Conflicted,
    };

    let detail = match state {
        LinkState::Linked => format!("-> {}", entry.source.display()),
        LinkState::Missing => "not linked yet".to_string(),
        LinkState::Drifted => "source changed since last sync".to_string(),
        LinkState::Conflicted => "target occupied by another file".to_string(),
    };

    LinkStatus {
        name: entry.name.clone(),
        state,
        target,
        detail,
    }
}

fn drift_state(repo: &Repo, entry: &ConfigEntry, baseline: &Baseline) -> LinkState {
    let Some(record) = baseline.links.get(&entry.name) else {
        return LinkState::Linked;
    };
    match crate::state::hash_source(&repo.root, entry) {
        Ok(hash) if hash != record.source_hash => LinkState::Drifted,
        _ => LinkState::Linked,
    }
}

pub fn link_statuses(repo: &Repo, baseline: &Baseline) -> Vec<LinkStatus> {
    repo.config
        .configs
        .iter()
        .map(|e| link_status(repo, e, baseline))
        .collect()
}

/// Conflicting files in `scope` (config names; empty scope means all).
///
/// A conflict is a target path that exists and is not a symlink back to the
/// config's source. Missing targets and correct links are not conflicts.
pub fn detect_conflicts(repo: &Repo, scope: &[String]) -> Result<Vec<ConflictFile>> {
    let mut out = Vec::new();
    for entry in &repo.config.configs {
        if !scope.is_empty() && !scope.iter().any(|n| n == &entry.name) {
            continue;
        }
        let source = repo.root.join(&entry.source);
        let target = expand_target(&entry.target)
            .with_context(|| format!("resolve target for {}", entry.name))?;
        let Ok(meta) = fs::symlink_metadata(&target) else {
            continue;
        };
        if meta.file_type().is_symlink() && fs::read_link(&target).ok().as_deref() == Some(&source)
        {
            continue;
        }
        out.push(ConflictFile {
            config: entry.name.clone(),
            path: target,
        });
    }
    Ok(out)
}

/// Create (or replace a stale link at) the entry's target.
///
/// Callers resolve conflicts first; a non-symlink occupying the target is an
/// error here, never silently overwritten.
pub fn sync_entry(repo: &Repo, entry: &ConfigEntry) -> Result<SyncOutcome> {
    let source = repo.root.join(&entry.source);
    if fs::symlink_metadata(&source).is_err() {
        return Err(anyhow!("source {} does not exist", source.display()));
    }
    let target = expand_target(&entry.target)?;

    match fs::symlink_metadata(&target) {
        Err(_) => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            make_symlink(&source, &target)?;
            Ok(SyncOutcome::Created)
        }
        Ok(meta) if meta.file_type().is_symlink() => {
            if fs::read_link(&target).ok().as_deref() == Some(&source) {
                return Ok(SyncOutcome::Unchanged);
            }
            fs::remove_file(&target)
                .with_context(|| format!("remove stale link {}", target.display()))?;
            make_symlink(&source, &target)?;
            Ok(SyncOutcome::Replaced)
        }
        Ok(_) => Err(anyhow!(
            "target {} exists and is not a symlink (resolve the conflict first)",
            target.display()
        )),
    }
}

/// Move a conflicting file under `backup_root/<stamp>/`, preserving as much
/// of its original layout as the path allows.
pub fn backup_file(backup_root: &Path, stamp: &str, path: &Path) -> Result<PathBuf> {
    let rel: PathBuf = path
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect();
    let dest = backup_root.join(stamp).join(rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::rename(path, &dest).or_else(|_| {
        // Cross-device fallback: copy then delete.
        copy_recursive(path, &dest)?;
        remove_path(path)
    })
    .with_context(|| format!("backup {} -> {}", path.display(), dest.display()))?;
    Ok(dest)
}

fn copy_recursive(from: &Path, to: &Path) -> std::io::Result<()> {
    let meta = fs::symlink_metadata(from)?;
    if meta.is_dir() {
        fs::create_dir_all(to)?;
        for child in fs::read_dir(from)? {
            let child = child?;
            copy_recursive(&child.path(), &to.join(child.file_name()))?;
        }
        Ok(())
    } else {
        fs::copy(from, to).map(|_| ())
    }
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

pub fn remove_file(path: &Path) -> Result<()> {
    remove_path(path).with_context(|| format!("remove {}", path.display()))
}

/// Remove every target that is currently a symlink into this repo.
pub fn uninstall(repo: &Repo) -> Result<usize> {
    let mut removed = 0;
    for entry in &repo.config.configs {
        let source = repo.root.join(&entry.source);
        let target = expand_target(&entry.target)?;
        let Ok(meta) = fs::symlink_metadata(&target) else {
            continue;
        };
        if meta.file_type().is_symlink() && fs::read_link(&target).ok().as_deref() == Some(&source)
        {
            fs::remove_file(&target)
                .with_context(|| format!("remove {}", target.display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "tests/links_tests.rs"]
mod tests;
