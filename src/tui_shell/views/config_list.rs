use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::{draw_modal_frame, modal_area, modal_block};

/// Filterable config list. Typing narrows; Enter requests a sync of the
/// selection; Ctrl-E hands the filter back to the caller as a List action.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct ConfigListView {
    all: Vec<String>,
    pub(in crate::tui_shell) filter: String,
    selected: usize,
}

pub(in crate::tui_shell) enum ConfigListOutcome {
    None,
    Close,
    Sync(String),
    ExitList(String),
}

impl ConfigListView {
    pub(in crate::tui_shell) fn new(all: Vec<String>) -> Self {
        Self {
            all,
            filter: String::new(),
            selected: 0,
        }
    }

    pub(in crate::tui_shell) fn filtered(&self) -> Vec<&str> {
        self.all
            .iter()
            .filter(|n| n.contains(self.filter.as_str()))
            .map(|n| n.as_str())
            .collect()
    }

    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> ConfigListOutcome {
        let filtered_len = self.filtered().len();
        match key.code {
            KeyCode::Esc => ConfigListOutcome::Close,
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ConfigListOutcome::ExitList(self.filter.clone())
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                ConfigListOutcome::None
            }
            KeyCode::Down => {
                if filtered_len > 0 {
                    self.selected = (self.selected + 1).min(filtered_len - 1);
                }
                ConfigListOutcome::None
            }
            KeyCode::Enter => match self.filtered().get(self.selected) {
                Some(name) => ConfigListOutcome::Sync((*name).to_string()),
                None => ConfigListOutcome::None,
            },
            KeyCode::Backspace => {
                self.filter.pop();
                self.selected = 0;
                ConfigListOutcome::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.selected = 0;
                ConfigListOutcome::None
            }
            _ => ConfigListOutcome::None,
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame, 50, 18);
        let block = modal_block("Configs", &["Esc", "Enter", "C-e list"]);
        let inner = draw_modal_frame(frame, area, &block);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("filter: ", Style::default().fg(Color::Gray)),
                Span::raw(self.filter.as_str()),
            ])),
            parts[0],
        );

        let filtered = self.filtered();
        let items: Vec<ListItem> = filtered.iter().map(|n| ListItem::new(*n)).collect();
        let mut state = ListState::default();
        if !filtered.is_empty() {
            state.select(Some(self.selected.min(filtered.len() - 1)));
        }
        frame.render_stateful_widget(
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            parts[1],
            &mut state,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/config_list_tests.rs"]
mod tests;
