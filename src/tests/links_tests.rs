use super::*;

use crate::config::Config;
use crate::model::Baseline;
use std::collections::BTreeMap;

/// Repo whose link targets live inside the tempdir, so tests never touch
/// the real home directory.
fn test_repo(root: &Path, targets_root: &Path, names: &[&str]) -> Repo {
    let configs = names
        .iter()
        .map(|name| ConfigEntry {
            name: name.to_string(),
            source: PathBuf::from(format!("src-{name}")),
            target: targets_root.join(name),
            depends_on: Vec::new(),
            ignore: Vec::new(),
        })
        .collect();
    Repo {
        root: root.to_path_buf(),
        config: Config {
            configs,
            ..Default::default()
        },
    }
}

fn empty_baseline() -> Baseline {
    Baseline {
        version: 1,
        updated_at: now_rfc3339(),
        links: BTreeMap::new(),
    }
}

#[test]
fn expand_target_passes_absolute_through() {
    let got = expand_target(Path::new("/tmp/x")).expect("expand");
    assert_eq!(got, PathBuf::from("/tmp/x"));
}

#[cfg(unix)]
#[test]
fn sync_creates_then_reports_unchanged() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let targets = tmp.path().join("home");
    let repo = test_repo(tmp.path(), &targets, &["vim"]);
    fs::write(tmp.path().join("src-vim"), "cfg").expect("write source");

    let entry = &repo.config.configs[0];
    assert_eq!(sync_entry(&repo, entry).expect("first"), SyncOutcome::Created);
    assert_eq!(
        sync_entry(&repo, entry).expect("second"),
        SyncOutcome::Unchanged
    );

    let dest = fs::read_link(targets.join("vim")).expect("read link");
    assert_eq!(dest, tmp.path().join("src-vim"));
}

#[cfg(unix)]
#[test]
fn sync_replaces_stale_link_but_not_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let targets = tmp.path().join("home");
    fs::create_dir_all(&targets).expect("mkdir");
    let repo = test_repo(tmp.path(), &targets, &["vim"]);
    fs::write(tmp.path().join("src-vim"), "cfg").expect("write source");

    // A link into somewhere else is stale and gets retargeted.
    std::os::unix::fs::symlink("/etc/hostname", targets.join("vim")).expect("stale link");
    let entry = &repo.config.configs[0];
    assert_eq!(
        sync_entry(&repo, entry).expect("sync"),
        SyncOutcome::Replaced
    );

    // A regular file is a conflict, never overwritten.
    fs::remove_file(targets.join("vim")).expect("remove");
    fs::write(targets.join("vim"), "precious").expect("occupy target");
    assert!(sync_entry(&repo, entry).is_err());
    assert_eq!(
        fs::read_to_string(targets.join("vim")).expect("read"),
        "precious"
    );
}

#[cfg(unix)]
#[test]
fn detect_conflicts_scopes_and_clears() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let targets = tmp.path().join("home");
    fs::create_dir_all(&targets).expect("mkdir");
    let repo = test_repo(tmp.path(), &targets, &["vim", "tmux"]);
    fs::write(tmp.path().join("src-vim"), "v").expect("write");
    fs::write(tmp.path().join("src-tmux"), "t").expect("write");
    fs::write(targets.join("vim"), "old vimrc").expect("occupy");

    let all = detect_conflicts(&repo, &[]).expect("scan all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].config, "vim");

    let scoped = detect_conflicts(&repo, &["tmux".to_string()]).expect("scan tmux");
    assert!(scoped.is_empty());

    fs::remove_file(targets.join("vim")).expect("resolve");
    assert!(detect_conflicts(&repo, &[]).expect("rescan").is_empty());
}

#[test]
fn backup_preserves_content_under_stamp() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let victim = tmp.path().join("home/.vimrc");
    fs::create_dir_all(victim.parent().expect("parent")).expect("mkdir");
    fs::write(&victim, "precious").expect("write");

    let backup_root = tmp.path().join("backups");
    let dest = backup_file(&backup_root, "2026-01-01T00-00-00Z", &victim).expect("backup");

    assert!(!victim.exists());
    assert!(dest.starts_with(backup_root.join("2026-01-01T00-00-00Z")));
    assert_eq!(fs::read_to_string(&dest).expect("read"), "precious");
}

#[cfg(unix)]
#[test]
fn uninstall_removes_only_owned_links() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let targets = tmp.path().join("home");
    fs::create_dir_all(&targets).expect("mkdir");
    let repo = test_repo(tmp.path(), &targets, &["vim", "tmux"]);
    fs::write(tmp.path().join("src-vim"), "v").expect("write");
    fs::write(tmp.path().join("src-tmux"), "t").expect("write");

    sync_entry(&repo, &repo.config.configs[0]).expect("sync vim");
    // tmux target occupied by a foreign link.
    std::os::unix::fs::symlink("/etc/hostname", targets.join("tmux")).expect("foreign");

    let removed = uninstall(&repo).expect("uninstall");
    assert_eq!(removed, 1);
    assert!(!targets.join("vim").exists());
    assert!(targets.join("tmux").is_symlink());
}

#[cfg(unix)]
#[test]
fn link_status_reports_each_state() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let targets = tmp.path().join("home");
    fs::create_dir_all(&targets).expect("mkdir");
    let repo = test_repo(tmp.path(), &targets, &["vim"]);
    fs::write(tmp.path().join("src-vim"), "v1").expect("write");
    let entry = &repo.config.configs[0];

    let mut baseline = empty_baseline();
    assert_eq!(
        link_status(&repo, entry, &baseline).state,
        LinkState::Missing
    );

    sync_entry(&repo, entry).expect("sync");
    baseline.record(&repo.root, entry).expect("record");
    assert_eq!(link_status(&repo, entry, &baseline).state, LinkState::Linked);

    fs::write(tmp.path().join("src-vim"), "v2").expect("mutate source");
    assert_eq!(
        link_status(&repo, entry, &baseline).state,
        LinkState::Drifted
    );

    fs::remove_file(targets.join("vim")).expect("remove link");
    fs::write(targets.join("vim"), "foreign").expect("occupy");
    assert_eq!(
        link_status(&repo, entry, &baseline).state,
        LinkState::Conflicted
    );
}
