use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Guided first-run flow: pick a directory, confirm, and a starter
/// manifest gets written there. Replaces the dashboard entirely until
/// the user finishes or backs out.
#[derive(Debug)]
pub(in crate::tui_shell) struct OnboardingView {
    dir: String,
    confirming: bool,
}

pub(in crate::tui_shell) enum OnboardingOutcome {
    None,
    Cancel,
    Complete(PathBuf),
}

impl OnboardingView {
    pub(in crate::tui_shell) fn new(default_dir: &std::path::Path) -> Self {
        Self {
            dir: default_dir.display().to_string(),
            confirming: false,
        }
    }

    pub(in crate::tui_shell) fn handle_key(&mut self, key: KeyEvent) -> OnboardingOutcome {
        if self.confirming {
            match key.code {
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.confirming = false;
                    OnboardingOutcome::None
                }
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    OnboardingOutcome::Complete(PathBuf::from(self.dir.trim()))
                }
                _ => OnboardingOutcome::None,
            }
        } else {
            match key.code {
                KeyCode::Esc => OnboardingOutcome::Cancel,
                KeyCode::Enter => {
                    if self.dir.trim().is_empty() {
                        OnboardingOutcome::None
                    } else {
                        self.confirming = true;
                        OnboardingOutcome::None
                    }
                }
                KeyCode::Backspace => {
                    self.dir.pop();
                    OnboardingOutcome::None
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.dir.push(c);
                    OnboardingOutcome::None
                }
                _ => OnboardingOutcome::None,
            }
        }
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(area);

        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to plait",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("No plait.yaml found. Set up a new dotfiles repository:"),
            Line::from(""),
            Line::from(vec![
                Span::raw("  directory: "),
                Span::styled(self.dir.clone(), Style::default().fg(Color::Cyan)),
                Span::styled("_", Style::default().fg(Color::Cyan)),
            ]),
        ];
        if self.confirming {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Create starter manifest here? (y/n)",
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter to continue, Esc to quit",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
    }
}
