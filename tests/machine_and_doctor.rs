use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};

use plait::config::Repo;
use plait::machine;
use plait::model::{CheckStatus, MachineState};

fn setup(tmp: &std::path::Path) -> Result<Repo> {
    let root = tmp.join("repo");
    fs::create_dir_all(root.join("templates")).context("create templates dir")?;
    let manifest = format!(
        "configs:
  - name: git
    source: gitconfig
    target: {target}
machine:
  - key: email
    prompt: Git email for this machine
    template: templates/gitconfig.local
    target: {local}
",
        target = tmp.join("home/gitconfig").display(),
        local = tmp.join("home/gitconfig.local").display()
    );
    fs::write(root.join("plait.yaml"), manifest).context("write manifest")?;
    fs::write(root.join("gitconfig"), "[user]\n").context("write source")?;
    fs::write(
        root.join("templates/gitconfig.local"),
        "[user]\n  email = {{email}}\n",
    )
    .context("write template")?;
    Repo::discover(&root)
}

#[test]
fn machine_value_flow_renders_template() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let repo = setup(tmp.path())?;
    let prompt = &repo.config.machine[0];

    let mut values = machine::load_values(&repo.root)?;
    assert_eq!(
        machine::status(&repo, prompt, &values).state,
        MachineState::Missing
    );

    values.insert("email".to_string(), "me@example.com".to_string());
    machine::save_values(&repo.root, &values)?;
    machine::render_write(&repo, prompt, &values)?;

    assert_eq!(
        machine::status(&repo, prompt, &values).state,
        MachineState::Configured
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("home/gitconfig.local"))?,
        "[user]\n  email = me@example.com\n"
    );

    // Values survive a reload, independently of the dotfiles themselves.
    let reloaded = machine::load_values(&repo.root)?;
    assert_eq!(reloaded, values);
    Ok(())
}

#[test]
fn render_refuses_partial_output() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let repo = setup(tmp.path())?;
    let prompt = &repo.config.machine[0];

    let err = machine::render_write(&repo, prompt, &BTreeMap::new()).unwrap_err();
    assert!(format!("{err:#}").contains("email"));
    assert!(!tmp.path().join("home/gitconfig.local").exists());
    Ok(())
}

#[test]
fn doctor_reflects_repo_state() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let repo = setup(tmp.path())?;

    let checks = plait::doctor::run_checks(&repo);
    let by_name = |name: &str| {
        checks
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing {name} check"))
    };
    assert_eq!(by_name("config").status, CheckStatus::Pass);
    assert_eq!(by_name("sources").status, CheckStatus::Pass);
    assert_eq!(by_name("git").status, CheckStatus::Skip);
    assert_eq!(by_name("baseline").status, CheckStatus::Warn);

    // Break a source and the sources check flips.
    fs::remove_file(repo.root.join("gitconfig")).context("remove source")?;
    let checks = plait::doctor::run_checks(&repo);
    let sources = checks
        .iter()
        .find(|c| c.name == "sources")
        .context("sources check")?;
    assert_eq!(sources.status, CheckStatus::Fail);
    assert!(sources.detail.contains("git"));
    Ok(())
}
