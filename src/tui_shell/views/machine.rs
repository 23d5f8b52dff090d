use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::MachineStatus;

use super::{draw_modal_frame, modal_area, modal_block};

/// Machine settings modal: pick a setting, enter its value, render the
/// template. Value editing is an inline text field.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct MachineView {
    pub(in crate::tui_shell) items: Vec<MachineStatus>,
    selected: usize,
    editing: Option<String>,
}

pub(in crate::tui_shell) enum MachineOutcome {
    None,
    Close,
    SetValue(String, String),
    Render(String),
}

impl MachineView {
    pub(in crate::tui_shell) fn new(items: Vec<MachineStatus>) -> Self {
        Self {
            items,
            selected: 0,
            editing: None,
        }
    }

    fn selected_key(&self) -> Option<String> {
        self.items.get(self.selected).map(|s| s.key.clone())
    }

    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> MachineOutcome {
        if let Some(buf) = &mut self.editing {
            match key.code {
                KeyCode::Esc => {
                    self.editing = None;
                    MachineOutcome::None
                }
                KeyCode::Enter => {
                    let value = self.editing.take().unwrap_or_default();
                    match self.selected_key() {
                        Some(k) => MachineOutcome::SetValue(k, value),
                        None => MachineOutcome::None,
                    }
                }
                KeyCode::Backspace => {
                    buf.pop();
                    MachineOutcome::None
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    buf.push(c);
                    MachineOutcome::None
                }
                _ => MachineOutcome::None,
            }
        } else {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => MachineOutcome::Close,
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                    MachineOutcome::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if !self.items.is_empty() {
                        self.selected = (self.selected + 1).min(self.items.len() - 1);
                    }
                    MachineOutcome::None
                }
                KeyCode::Enter => {
                    if self.selected_key().is_some() {
                        self.editing = Some(String::new());
                    }
                    MachineOutcome::None
                }
                KeyCode::Char('g') => match self.selected_key() {
                    Some(k) => MachineOutcome::Render(k),
                    None => MachineOutcome::None,
                },
                _ => MachineOutcome::None,
            }
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame, 70, 16);
        let block = modal_block("Machine Config", &["Esc", "Enter edit", "g render"]);
        let inner = draw_modal_frame(frame, area, &block);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:10}", s.state.label()),
                        super::super::panels::overrides_state_style(s.state),
                    ),
                    Span::raw(" "),
                    Span::raw(s.key.clone()),
                    Span::raw("  "),
                    Span::styled(s.detail.clone(), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();
        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            parts[0],
            &mut state,
        );

        if let Some(buf) = &self.editing {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("value: ", Style::default().fg(Color::Yellow)),
                    Span::raw(buf.as_str()),
                ])),
                parts[1],
            );
        }
    }
}
