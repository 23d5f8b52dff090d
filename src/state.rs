use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::{ConfigEntry, Repo};
use crate::model::{Baseline, DriftSummary, LinkRecord};

pub const STATE_DIR: &str = ".plait";

fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join("state.json")
}

impl Baseline {
    pub fn load_or_create(root: &Path) -> Result<Self> {
        let path = state_path(root);
        if !path.exists() {
            return Ok(Self {
                version: 1,
                updated_at: crate::links::now_rfc3339(),
                links: BTreeMap::new(),
            });
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let baseline: Baseline =
            serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
        Ok(baseline)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = state_path(root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let bytes = serde_json::to_vec_pretty(self).context("serialize baseline")?;
        write_atomic(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Record a freshly synced entry. The caller persists with `save`.
    pub fn record(&mut self, repo_root: &Path, entry: &ConfigEntry) -> Result<()> {
        let hash = hash_source(repo_root, entry)?;
        self.links.insert(
            entry.name.clone(),
            LinkRecord {
                target: entry.target.display().to_string(),
                source_hash: hash,
            },
        );
        self.updated_at = crate::links::now_rfc3339();
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

fn ignore_set(entry: &ConfigEntry) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in &entry.ignore {
        builder.add(Glob::new(pat).with_context(|| format!("bad ignore glob {pat:?}"))?);
    }
    Ok(builder.build().context("build ignore globset")?)
}

/// Content hash of a config's source: the file's bytes, or for a directory a
/// hash over sorted relative paths and per-file hashes.
pub fn hash_source(repo_root: &Path, entry: &ConfigEntry) -> Result<String> {
    let source = repo_root.join(&entry.source);
    let meta = fs::symlink_metadata(&source)
        .with_context(|| format!("stat {}", source.display()))?;

    if meta.is_file() {
        let bytes = fs::read(&source).with_context(|| format!("read {}", source.display()))?;
        return Ok(blake3::hash(&bytes).to_hex().to_string());
    }
    if !meta.is_dir() {
        return Err(anyhow!("source {} is not a file or directory", source.display()));
    }

    let ignore = ignore_set(entry)?;
    let mut files = Vec::new();
    collect_files(&source, &source, &ignore, &mut files)?;
    files.sort();

    let mut hasher = blake3::Hasher::new();
    for rel in files {
        let bytes = fs::read(source.join(&rel))
            .with_context(|| format!("read {}", source.join(&rel).display()))?;
        hasher.update(rel.as_bytes());
        hasher.update(b"\0");
        hasher.update(blake3::hash(&bytes).as_bytes());
    }
    Ok(hasher.finalize().to_hex().to_string())
}

fn collect_files(
    base: &Path,
    dir: &Path,
    ignore: &GlobSet,
    out: &mut Vec<String>,
) -> Result<()> {
    let mut children: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("read dir {}", dir.display()))?
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("read dir entries {}", dir.display()))?;
    children.sort_by_key(|e| e.file_name());

    for child in children {
        let path = child.path();
        let rel = path
            .strip_prefix(base)
            .with_context(|| format!("strip {} from {}", base.display(), path.display()))?
            .to_string_lossy()
            .into_owned();
        if ignore.is_match(&rel) {
            continue;
        }
        let file_type = child.file_type().context("read file type")?;
        if file_type.is_dir() {
            collect_files(base, &path, ignore, out)?;
        } else if file_type.is_file() {
            out.push(rel);
        }
        // Symlinks inside sources are left out of the hash on purpose: their
        // targets may live outside the repo.
    }
    Ok(())
}

/// Compare every config's current source hash against the baseline.
pub fn drift_summary(repo: &Repo, baseline: &Baseline) -> Result<DriftSummary> {
    let mut summary = DriftSummary::default();
    for entry in &repo.config.configs {
        match baseline.links.get(&entry.name) {
            None => summary.untracked += 1,
            Some(record) => {
                let current = hash_source(&repo.root, entry)
                    .with_context(|| format!("hash source for {}", entry.name))?;
                if current == record.source_hash {
                    summary.clean += 1;
                } else {
                    summary.drifted.push(entry.name.clone());
                }
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
