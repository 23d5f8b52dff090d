use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::model::{LinkState, LinkStatus};

use super::{Panel, panel_block};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct ConfigsPanel {
    pub(in crate::tui_shell) rows: Vec<LinkStatus>,
    pub(in crate::tui_shell) selected: usize,
    focused: bool,
}

impl ConfigsPanel {
    pub(in crate::tui_shell) fn set_rows(&mut self, rows: Vec<LinkStatus>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub(in crate::tui_shell) fn selected_row(&self) -> Option<&LinkStatus> {
        self.rows.get(self.selected)
    }
}

pub(in crate::tui_shell) fn state_style(state: LinkState) -> Style {
    match state {
        LinkState::Linked => Style::default().fg(Color::Green),
        LinkState::Missing => Style::default().fg(Color::Gray),
        LinkState::Drifted => Style::default().fg(Color::Yellow),
        LinkState::Conflicted => Style::default().fg(Color::Red),
    }
}

impl Panel for ConfigsPanel {
    fn title(&self) -> String {
        format!("Configs ({})", self.rows.len())
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        super::move_cursor(&mut self.selected, self.rows.len(), key.code);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|r| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:8}", r.state.label()), state_style(r.state)),
                    Span::raw(" "),
                    Span::raw(r.name.clone()),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if !self.rows.is_empty() {
            state.select(Some(self.selected));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
