use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{draw_modal_frame, modal_area, modal_block};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ConfirmKind {
    Uninstall,
}

/// Binary choice modal. Left/right/tab/y/n all move the same two-valued
/// cursor; Enter commits. Defaults to No.
#[derive(Debug)]
pub(in crate::tui_shell) struct ConfirmView {
    pub(in crate::tui_shell) kind: ConfirmKind,
    question: String,
    detail: Vec<String>,
    yes: bool,
}

pub(in crate::tui_shell) enum ConfirmOutcome {
    None,
    Resolved(bool),
}

impl ConfirmView {
    pub(in crate::tui_shell) fn new(
        kind: ConfirmKind,
        question: impl Into<String>,
        detail: Vec<String>,
    ) -> Self {
        Self {
            kind,
            question: question.into(),
            detail,
            yes: false,
        }
    }

    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> ConfirmOutcome {
        match key.code {
            KeyCode::Esc => ConfirmOutcome::Resolved(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.yes = !self.yes;
                ConfirmOutcome::None
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.yes = true;
                ConfirmOutcome::None
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.yes = false;
                ConfirmOutcome::None
            }
            KeyCode::Enter => ConfirmOutcome::Resolved(self.yes),
            _ => ConfirmOutcome::None,
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame, 60, self.detail.len() as u16 + 6);
        let block = modal_block("Confirm", &["Esc", "Enter"]);
        let inner = draw_modal_frame(frame, area, &block);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let mut lines = vec![Line::from(self.question.as_str()), Line::default()];
        for d in &self.detail {
            lines.push(Line::from(Span::styled(
                d.as_str(),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), parts[0]);

        let selected = Style::default().add_modifier(Modifier::REVERSED);
        let plain = Style::default().fg(Color::Gray);
        let buttons = Line::from(vec![
            Span::styled(" Yes ", if self.yes { selected } else { plain }),
            Span::raw("   "),
            Span::styled(" No ", if self.yes { plain } else { selected }),
        ]);
        frame.render_widget(Paragraph::new(buttons), parts[1]);
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/confirm_tests.rs"]
mod tests;
