use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::{ExternalState, ExternalStatus};

use super::{Panel, panel_block};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct ExternalPanel {
    pub(in crate::tui_shell) items: Vec<ExternalStatus>,
    pub(in crate::tui_shell) loading: bool,
    pub(in crate::tui_shell) selected: usize,
    focused: bool,
}

impl ExternalPanel {
    pub(in crate::tui_shell) fn set_items(&mut self, items: Vec<ExternalStatus>) {
        self.items = items;
        self.loading = false;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub(in crate::tui_shell) fn selected_status(&self) -> Option<&ExternalStatus> {
        self.items.get(self.selected)
    }
}

pub(in crate::tui_shell) fn state_style(state: ExternalState) -> Style {
    match state {
        ExternalState::Installed => Style::default().fg(Color::Green),
        ExternalState::Missing => Style::default().fg(Color::Red),
        ExternalState::Skipped => Style::default().fg(Color::Gray),
    }
}

impl Panel for ExternalPanel {
    fn title(&self) -> String {
        if self.loading {
            "External (loading...)".to_string()
        } else {
            format!("External ({})", self.items.len())
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        super::move_cursor(&mut self.selected, self.items.len(), key.code);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        if self.loading {
            frame.render_widget(
                Paragraph::new("checking dependencies...")
                    .style(Style::default().fg(Color::Gray))
                    .block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:10}", s.state.label()), state_style(s.state)),
                    Span::raw(" "),
                    Span::raw(s.name.clone()),
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
