use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::model::ExternalStatus;

use super::{draw_modal_frame, modal_area, modal_block};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct ExternalView {
    pub(in crate::tui_shell) items: Vec<ExternalStatus>,
    selected: usize,
}

pub(in crate::tui_shell) enum ExternalOutcome {
    None,
    Close,
    Clone(String),
}

impl ExternalView {
    pub(in crate::tui_shell) fn new(items: Vec<ExternalStatus>) -> Self {
        Self { items, selected: 0 }
    }

    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> ExternalOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => ExternalOutcome::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ExternalOutcome::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.items.is_empty() {
                    self.selected = (self.selected + 1).min(self.items.len() - 1);
                }
                ExternalOutcome::None
            }
            KeyCode::Enter => match self.items.get(self.selected) {
                Some(item) => ExternalOutcome::Clone(item.name.clone()),
                None => ExternalOutcome::None,
            },
            _ => ExternalOutcome::None,
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame, 70, 16);
        let block = modal_block("External Dependencies", &["Esc", "Enter clone/update"]);
        let inner = draw_modal_frame(frame, area, &block);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:10}", s.state.label()),
                        super::super::panels::external_state_style(s.state),
                    ),
                    Span::raw(" "),
                    Span::raw(s.name.clone()),
                    Span::raw("  "),
                    Span::styled(s.detail.clone(), Style::default().fg(ratatui::style::Color::Gray)),
                ]))
            })
            .collect();
        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            inner,
            &mut state,
        );
    }
}
