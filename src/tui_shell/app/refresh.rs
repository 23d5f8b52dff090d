use std::thread;

use serde_json::json;

use crate::links;
use crate::model::{Baseline, LinkState};

use super::super::panel::{Panel, PanelId};
use super::super::panels::{DetailsSource, Panels};
use super::{App, UiMsg};

impl App {
    /// Rebuild every panel from disk. Link statuses are computed inline;
    /// health checks and external probes go to background threads because
    /// both can stall on slow filesystems or a missing git binary.
    pub(super) fn refresh_all(&mut self) {
        self.refresh_links();
        self.refresh_health();
        self.refresh_external();
        self.apply_focus(self.focus.current());
    }

    pub(super) fn refresh_links(&mut self) {
        let Some(repo) = self.repo.clone() else {
            return;
        };
        if let Ok(baseline) = Baseline::load_or_create(&repo.root) {
            self.baseline = baseline;
        }
        let rows = links::link_statuses(&repo, &self.baseline);

        let count = |state: LinkState| rows.iter().filter(|r| r.state == state).count();
        self.panels.summary.linked = count(LinkState::Linked);
        self.panels.summary.missing = count(LinkState::Missing);
        self.panels.summary.drifted = count(LinkState::Drifted);
        self.panels.summary.conflicted = count(LinkState::Conflicted);
        self.panels.summary.last_sync = if self.baseline.links.is_empty() {
            None
        } else {
            Some(self.baseline.updated_at.clone())
        };
        self.panels.configs.set_rows(rows);

        self.panels
            .overrides
            .set_items(crate::machine::statuses(&repo, &self.machine_values));
        self.refresh_details();
    }

    pub(super) fn refresh_health(&mut self) {
        let Some(repo) = self.repo.clone() else {
            return;
        };
        self.panels.health.loading = true;
        let tx = self.msg_tx.clone();
        thread::spawn(move || {
            let checks = crate::doctor::run_checks(&repo);
            let _ = tx.send(UiMsg::HealthLoaded(checks));
        });
    }

    pub(super) fn refresh_external(&mut self) {
        let Some(repo) = self.repo.clone() else {
            return;
        };
        self.panels.external.loading = true;
        let tx = self.msg_tx.clone();
        thread::spawn(move || {
            let items = crate::external::statuses(&repo.config.external);
            let _ = tx.send(UiMsg::ExternalLoaded(items));
        });
    }

    /// The one place focus actually changes: clear the old flag, set the
    /// new one, move the manager, re-derive the details pane. Callers that
    /// skip this helper would leave two panels highlighted.
    pub(super) fn apply_focus(&mut self, id: PanelId) {
        for pid in Panels::all_ids() {
            self.panels.get_mut(pid).set_focused(pid == id);
        }
        self.focus.set(id);
        self.refresh_details();
        self.trace_event("focus", json!({ "panel": format!("{id:?}") }));
    }

    /// Details mirrors the focused panel's selection. Re-derived from the
    /// source panel's data on every focus or cursor change.
    pub(super) fn refresh_details(&mut self) {
        let (source, lines) = match self.focus.current() {
            PanelId::Configs | PanelId::Summary | PanelId::Details => {
                let lines = self.panels.configs.selected_row().map(|row| {
                    let mut lines = vec![
                        row.name.clone(),
                        format!("state:  {}", row.state.label()),
                        format!("target: {}", row.target.display()),
                        row.detail.clone(),
                    ];
                    if let Some(record) = self.baseline.links.get(&row.name) {
                        lines.push(format!("hash:   {}", &record.source_hash));
                    }
                    lines
                });
                (DetailsSource::Configs, lines)
            }
            PanelId::Health => {
                let lines = self.panels.health.selected_check().map(|c| {
                    vec![
                        c.name.clone(),
                        format!("status: {}", c.status.glyph()),
                        c.detail.clone(),
                    ]
                });
                (DetailsSource::Health, lines)
            }
            PanelId::Overrides => {
                let lines = self.panels.overrides.selected_status().map(|s| {
                    vec![
                        s.key.clone(),
                        format!("state: {}", s.state.label()),
                        s.detail.clone(),
                    ]
                });
                (DetailsSource::Overrides, lines)
            }
            PanelId::External => {
                let lines = self.panels.external.selected_status().map(|s| {
                    vec![
                        s.name.clone(),
                        format!("state: {}", s.state.label()),
                        s.detail.clone(),
                    ]
                });
                (DetailsSource::External, lines)
            }
            PanelId::Output => {
                let lines = self
                    .panels
                    .output
                    .entries
                    .last()
                    .map(|e| vec![format!("{} {}", e.ts, e.text)]);
                (DetailsSource::Output, lines)
            }
        };
        self.panels
            .details
            .set_context(source, lines.unwrap_or_default());
    }
}
