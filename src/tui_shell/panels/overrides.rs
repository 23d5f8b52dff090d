use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::model::{MachineState, MachineStatus};

use super::{Panel, panel_block};

/// Machine-local overrides: per-machine settings rendered from templates.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct OverridesPanel {
    pub(in crate::tui_shell) items: Vec<MachineStatus>,
    pub(in crate::tui_shell) selected: usize,
    focused: bool,
}

impl OverridesPanel {
    pub(in crate::tui_shell) fn set_items(&mut self, items: Vec<MachineStatus>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub(in crate::tui_shell) fn selected_status(&self) -> Option<&MachineStatus> {
        self.items.get(self.selected)
    }
}

pub(in crate::tui_shell) fn state_style(state: MachineState) -> Style {
    match state {
        MachineState::Configured => Style::default().fg(Color::Green),
        MachineState::Missing => Style::default().fg(Color::Yellow),
        MachineState::Error => Style::default().fg(Color::Red),
    }
}

impl Panel for OverridesPanel {
    fn title(&self) -> String {
        format!("Overrides ({})", self.items.len())
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        super::move_cursor(&mut self.selected, self.items.len(), key.code);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:10}", s.state.label()), state_style(s.state)),
                    Span::raw(" "),
                    Span::raw(s.key.clone()),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
