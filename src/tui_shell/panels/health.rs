use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::{CheckResult, CheckStatus};

use super::{Panel, panel_block};

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct HealthPanel {
    pub(in crate::tui_shell) checks: Vec<CheckResult>,
    pub(in crate::tui_shell) loading: bool,
    pub(in crate::tui_shell) selected: usize,
    focused: bool,
}

impl HealthPanel {
    pub(in crate::tui_shell) fn set_checks(&mut self, checks: Vec<CheckResult>) {
        self.checks = checks;
        self.loading = false;
        self.selected = self.selected.min(self.checks.len().saturating_sub(1));
    }

    pub(in crate::tui_shell) fn selected_check(&self) -> Option<&CheckResult> {
        self.checks.get(self.selected)
    }
}

pub(in crate::tui_shell) fn status_style(status: CheckStatus) -> Style {
    match status {
        CheckStatus::Pass => Style::default().fg(Color::Green),
        CheckStatus::Warn => Style::default().fg(Color::Yellow),
        CheckStatus::Fail => Style::default().fg(Color::Red),
        CheckStatus::Skip => Style::default().fg(Color::Gray),
    }
}

impl Panel for HealthPanel {
    fn title(&self) -> String {
        if self.loading {
            "Health (checking...)".to_string()
        } else {
            let failing = self
                .checks
                .iter()
                .filter(|c| c.status == CheckStatus::Fail)
                .count();
            if failing == 0 {
                "Health".to_string()
            } else {
                format!("Health ({failing} failing)")
            }
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        super::move_cursor(&mut self.selected, self.checks.len(), key.code);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        if self.loading {
            frame.render_widget(
                Paragraph::new("running checks...")
                    .style(Style::default().fg(Color::Gray))
                    .block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .checks
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:5}", c.status.glyph()), status_style(c.status)),
                    Span::raw(" "),
                    Span::raw(c.name.clone()),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if !self.checks.is_empty() {
            state.select(Some(self.selected));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
