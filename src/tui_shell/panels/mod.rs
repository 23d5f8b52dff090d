mod configs;
mod details;
mod external;
mod health;
mod output;
mod overrides;
mod summary;

pub(in crate::tui_shell) use configs::ConfigsPanel;
pub(in crate::tui_shell) use details::{DetailsPanel, DetailsSource};
pub(in crate::tui_shell) use external::{ExternalPanel, state_style as external_state_style};
pub(in crate::tui_shell) use health::HealthPanel;
pub(in crate::tui_shell) use output::{LogLevel, OutputPanel, StepStatus};
pub(in crate::tui_shell) use overrides::{OverridesPanel, state_style as overrides_state_style};
pub(in crate::tui_shell) use summary::SummaryPanel;

use super::panel::{Panel, PanelId, panel_block};

/// Owns every panel. The Details panel refers to its siblings only through
/// `DetailsSource`, never through references, so panels can be rebuilt
/// wholesale (after onboarding) without aliasing hazards.
pub(in crate::tui_shell) struct Panels {
    pub(in crate::tui_shell) summary: SummaryPanel,
    pub(in crate::tui_shell) health: HealthPanel,
    pub(in crate::tui_shell) overrides: OverridesPanel,
    pub(in crate::tui_shell) external: ExternalPanel,
    pub(in crate::tui_shell) configs: ConfigsPanel,
    pub(in crate::tui_shell) details: DetailsPanel,
    pub(in crate::tui_shell) output: OutputPanel,
}

impl Panels {
    pub(in crate::tui_shell) fn new() -> Self {
        Self {
            summary: SummaryPanel::default(),
            health: HealthPanel::default(),
            overrides: OverridesPanel::default(),
            external: ExternalPanel::default(),
            configs: ConfigsPanel::default(),
            details: DetailsPanel::default(),
            output: OutputPanel::default(),
        }
    }

    pub(in crate::tui_shell) fn get_mut(&mut self, id: PanelId) -> &mut dyn Panel {
        match id {
            PanelId::Summary => &mut self.summary,
            PanelId::Health => &mut self.health,
            PanelId::Overrides => &mut self.overrides,
            PanelId::External => &mut self.external,
            PanelId::Configs => &mut self.configs,
            PanelId::Details => &mut self.details,
            PanelId::Output => &mut self.output,
        }
    }

    pub(in crate::tui_shell) fn all_ids() -> [PanelId; 7] {
        [
            PanelId::Summary,
            PanelId::Health,
            PanelId::Overrides,
            PanelId::External,
            PanelId::Configs,
            PanelId::Details,
            PanelId::Output,
        ]
    }
}

/// Shared cursor movement for list panels.
fn move_cursor(selected: &mut usize, len: usize, key: crossterm::event::KeyCode) {
    use crossterm::event::KeyCode;
    match key {
        KeyCode::Up | KeyCode::Char('k') => *selected = selected.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            if len > 0 {
                *selected = (*selected + 1).min(len - 1);
            }
        }
        KeyCode::Home => *selected = 0,
        KeyCode::End => *selected = len.saturating_sub(1),
        _ => {}
    }
}
