use std::collections::HashSet;
use std::fs;

use crate::config::Repo;
use crate::links::expand_target;
use crate::model::{Baseline, CheckResult, CheckStatus};

/// Run every health check. Checks never fail as calls; problems are data.
pub fn run_checks(repo: &Repo) -> Vec<CheckResult> {
    let mut out = Vec::new();
    out.push(check_config(repo));
    out.push(check_sources(repo));
    out.push(check_targets(repo));
    out.push(check_dangling(repo));
    out.push(check_depends(repo));
    out.push(check_git(repo));
    out.push(check_baseline(repo));
    out
}

fn check(name: &str, status: CheckStatus, detail: impl Into<String>) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status,
        detail: detail.into(),
    }
}

fn check_config(repo: &Repo) -> CheckResult {
    if repo.config.configs.is_empty() {
        return check("config", CheckStatus::Warn, "no configs declared");
    }
    let mut seen = HashSet::new();
    for entry in &repo.config.configs {
        if !seen.insert(entry.name.as_str()) {
            return check(
                "config",
                CheckStatus::Fail,
                format!("duplicate config name {:?}", entry.name),
            );
        }
    }
    check(
        "config",
        CheckStatus::Pass,
        format!("{} configs", repo.config.configs.len()),
    )
}

fn check_sources(repo: &Repo) -> CheckResult {
    let missing: Vec<_> = repo
        .config
        .configs
        .iter()
        .filter(|e| fs::symlink_metadata(repo.root.join(&e.source)).is_err())
        .map(|e| e.name.clone())
        .collect();
    if missing.is_empty() {
        check("sources", CheckStatus::Pass, "all sources present")
    } else {
        check(
            "sources",
            CheckStatus::Fail,
            format!("missing: {}", missing.join(", ")),
        )
    }
}

fn check_targets(repo: &Repo) -> CheckResult {
    for entry in &repo.config.configs {
        if let Err(err) = expand_target(&entry.target) {
            return check(
                "targets",
                CheckStatus::Fail,
                format!("{}: {err:#}", entry.name),
            );
        }
    }
    check("targets", CheckStatus::Pass, "all targets resolvable")
}

fn check_dangling(repo: &Repo) -> CheckResult {
    let mut dangling = Vec::new();
    for entry in &repo.config.configs {
        let Ok(target) = expand_target(&entry.target) else {
            continue;
        };
        let Ok(meta) = fs::symlink_metadata(&target) else {
            continue;
        };
        if meta.file_type().is_symlink() && fs::metadata(&target).is_err() {
            dangling.push(entry.name.clone());
        }
    }
    if dangling.is_empty() {
        check("symlinks", CheckStatus::Pass, "no dangling links")
    } else {
        check(
            "symlinks",
            CheckStatus::Warn,
            format!("dangling: {}", dangling.join(", ")),
        )
    }
}

fn check_depends(repo: &Repo) -> CheckResult {
    let names: HashSet<_> = repo.config.configs.iter().map(|e| e.name.as_str()).collect();
    let mut unknown = Vec::new();
    for entry in &repo.config.configs {
        for dep in &entry.depends_on {
            if !names.contains(dep.as_str()) {
                unknown.push(format!("{} -> {}", entry.name, dep));
            }
        }
    }
    if unknown.is_empty() {
        check("depends", CheckStatus::Pass, "all references resolve")
    } else {
        check(
            "depends",
            CheckStatus::Fail,
            format!("unknown: {}", unknown.join(", ")),
        )
    }
}

fn check_git(repo: &Repo) -> CheckResult {
    if repo.config.external.is_empty() {
        return check("git", CheckStatus::Skip, "no external dependencies");
    }
    if crate::external::git_available() {
        check("git", CheckStatus::Pass, "git binary found")
    } else {
        check("git", CheckStatus::Fail, "git binary not found in PATH")
    }
}

fn check_baseline(repo: &Repo) -> CheckResult {
    let baseline = match Baseline::load_or_create(&repo.root) {
        Ok(b) => b,
        Err(err) => return check("baseline", CheckStatus::Fail, format!("{err:#}")),
    };
    if baseline.links.is_empty() {
        return check("baseline", CheckStatus::Warn, "no baseline yet (run sync)");
    }
    match crate::state::drift_summary(repo, &baseline) {
        Ok(s) if s.drifted.is_empty() => check(
            "baseline",
            CheckStatus::Pass,
            format!("{} links recorded, none drifted", baseline.links.len()),
        ),
        Ok(s) => check(
            "baseline",
            CheckStatus::Warn,
            format!("drifted since last sync: {}", s.drifted.join(", ")),
        ),
        Err(err) => check("baseline", CheckStatus::Fail, format!("{err:#}")),
    }
}

#[cfg(test)]
#[path = "tests/doctor_tests.rs"]
mod tests;
