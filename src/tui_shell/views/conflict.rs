use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::ConflictFile;

use super::{draw_modal_frame, modal_area, modal_block};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ConflictChoice {
    Backup,
    Delete,
    Cancel,
}

const CHOICES: [ConflictChoice; 3] = [
    ConflictChoice::Backup,
    ConflictChoice::Delete,
    ConflictChoice::Cancel,
];

/// Conflict-resolution modal: the files blocking a pending operation,
/// grouped by config, with a cursor over {Backup, Delete, Cancel}.
/// Defaults to Cancel.
#[derive(Debug)]
pub(in crate::tui_shell) struct ConflictView {
    pub(in crate::tui_shell) files: Vec<ConflictFile>,
    choice: usize,
    scroll: usize,
}

pub(in crate::tui_shell) enum ConflictOutcome {
    None,
    Resolved(ConflictChoice),
}

impl ConflictView {
    pub(in crate::tui_shell) fn new(files: Vec<ConflictFile>) -> Self {
        Self {
            files,
            choice: CHOICES.len() - 1,
            scroll: 0,
        }
    }

    fn grouped_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        let mut last_config: Option<&str> = None;
        for file in &self.files {
            if last_config != Some(file.config.as_str()) {
                lines.push(Line::from(Span::styled(
                    file.config.as_str(),
                    Style::default().fg(Color::Yellow),
                )));
                last_config = Some(file.config.as_str());
            }
            lines.push(Line::from(format!("  {}", file.path.display())));
        }
        lines
    }

    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> ConflictOutcome {
        match key.code {
            KeyCode::Esc => ConflictOutcome::Resolved(ConflictChoice::Cancel),
            KeyCode::Left => {
                self.choice = self.choice.saturating_sub(1);
                ConflictOutcome::None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.choice = (self.choice + 1) % CHOICES.len();
                ConflictOutcome::None
            }
            KeyCode::Char('b') => ConflictOutcome::Resolved(ConflictChoice::Backup),
            KeyCode::Char('d') => ConflictOutcome::Resolved(ConflictChoice::Delete),
            KeyCode::Char('c') => ConflictOutcome::Resolved(ConflictChoice::Cancel),
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                ConflictOutcome::None
            }
            KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.files.len().saturating_sub(1));
                ConflictOutcome::None
            }
            KeyCode::Enter => ConflictOutcome::Resolved(CHOICES[self.choice]),
            _ => ConflictOutcome::None,
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame, 80, 20);
        let title = format!("Conflicts ({})", self.files.len());
        let block = modal_block(&title, &["Esc", "Enter", "b/d/c"]);
        let inner = draw_modal_frame(frame, area, &block);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(
                "These files are in the way of the requested operation.\n\
                 Back them up, delete them, or cancel.",
            )
            .style(Style::default().fg(Color::Gray)),
            parts[0],
        );

        frame.render_widget(
            Paragraph::new(self.grouped_lines())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll as u16, 0)),
            parts[1],
        );

        let selected = Style::default().add_modifier(Modifier::REVERSED);
        let plain = Style::default().fg(Color::Gray);
        let style_for = |c: ConflictChoice| {
            if CHOICES[self.choice] == c {
                selected
            } else {
                plain
            }
        };
        let buttons = Line::from(vec![
            Span::styled(" Backup ", style_for(ConflictChoice::Backup)),
            Span::raw("  "),
            Span::styled(" Delete ", style_for(ConflictChoice::Delete)),
            Span::raw("  "),
            Span::styled(" Cancel ", style_for(ConflictChoice::Cancel)),
        ]);
        frame.render_widget(Paragraph::new(buttons), parts[2]);
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/conflict_tests.rs"]
mod tests;
