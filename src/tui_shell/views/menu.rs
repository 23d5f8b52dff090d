use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState};

use super::{draw_modal_frame, modal_area, modal_block};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum MenuAction {
    SyncAll,
    Install,
    Doctor,
    Update,
    ConfigList,
    External,
    Machine,
    Uninstall,
    Quit,
}

const ENTRIES: [(&str, MenuAction); 9] = [
    ("Sync All", MenuAction::SyncAll),
    ("Install", MenuAction::Install),
    ("Doctor", MenuAction::Doctor),
    ("Update", MenuAction::Update),
    ("Config List", MenuAction::ConfigList),
    ("External Dependencies", MenuAction::External),
    ("Machine Config", MenuAction::Machine),
    ("Uninstall", MenuAction::Uninstall),
    ("Quit", MenuAction::Quit),
];

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct MenuView {
    selected: usize,
}

pub(in crate::tui_shell) enum MenuOutcome {
    None,
    Close,
    Pick(MenuAction),
}

impl MenuView {
    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> MenuOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => MenuOutcome::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                MenuOutcome::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(ENTRIES.len() - 1);
                MenuOutcome::None
            }
            KeyCode::Enter => MenuOutcome::Pick(ENTRIES[self.selected].1),
            _ => MenuOutcome::None,
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame, 40, ENTRIES.len() as u16 + 2);
        let block = modal_block("Menu", &["Esc", "Enter"]);
        let inner = draw_modal_frame(frame, area, &block);

        let items: Vec<ListItem> = ENTRIES
            .iter()
            .map(|(label, _)| ListItem::new(*label))
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            inner,
            &mut state,
        );
    }
}
