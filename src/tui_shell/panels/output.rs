use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use super::{Panel, panel_block};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum StepStatus {
    Success,
    Warning,
    Error,
    Skipped,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct LogEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) level: LogLevel,
    pub(in crate::tui_shell) text: String,
}

/// One operation step: running until a terminal status arrives.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct StepRow {
    pub(in crate::tui_shell) detail: String,
    pub(in crate::tui_shell) status: Option<StepStatus>,
}

const TS_FORMAT: &[FormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

fn short_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&TS_FORMAT)
        .unwrap_or_default()
}

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Append-only operation log plus per-step progress. Only the dispatch loop
/// writes here, in reaction to worker messages.
#[derive(Debug)]
pub(in crate::tui_shell) struct OutputPanel {
    pub(in crate::tui_shell) op_title: String,
    pub(in crate::tui_shell) entries: Vec<LogEntry>,
    pub(in crate::tui_shell) steps: Vec<StepRow>,
    pub(in crate::tui_shell) spinner: usize,
    scroll: usize,
    follow: bool,
    focused: bool,
}

impl Default for OutputPanel {
    fn default() -> Self {
        Self {
            op_title: String::new(),
            entries: Vec::new(),
            steps: Vec::new(),
            spinner: 0,
            scroll: 0,
            follow: true,
            focused: false,
        }
    }
}

impl OutputPanel {
    /// Reset for a new operation: clear the log, retitle.
    pub(in crate::tui_shell) fn begin(&mut self, title: &str) {
        self.op_title = title.to_string();
        self.entries.clear();
        self.steps.clear();
        self.scroll = 0;
        self.follow = true;
    }

    pub(in crate::tui_shell) fn log(&mut self, level: LogLevel, text: impl Into<String>) {
        self.entries.push(LogEntry {
            ts: short_ts(),
            level,
            text: text.into(),
        });
    }

    pub(in crate::tui_shell) fn progress(&mut self, step: usize, detail: String) {
        while self.steps.len() <= step {
            self.steps.push(StepRow {
                detail: String::new(),
                status: None,
            });
        }
        self.steps[step].detail = detail;
    }

    pub(in crate::tui_shell) fn complete_step(
        &mut self,
        step: usize,
        status: StepStatus,
        detail: String,
    ) {
        self.progress(step, detail);
        self.steps[step].status = Some(status);
    }

    pub(in crate::tui_shell) fn tick(&mut self) {
        self.spinner = (self.spinner + 1) % SPINNER.len();
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::with_capacity(self.steps.len() + self.entries.len());
        for row in &self.steps {
            let (glyph, style) = match row.status {
                None => (
                    SPINNER[self.spinner].to_string(),
                    Style::default().fg(Color::Cyan),
                ),
                Some(StepStatus::Success) => ("+".to_string(), Style::default().fg(Color::Green)),
                Some(StepStatus::Warning) => ("!".to_string(), Style::default().fg(Color::Yellow)),
                Some(StepStatus::Error) => ("x".to_string(), Style::default().fg(Color::Red)),
                Some(StepStatus::Skipped) => ("-".to_string(), Style::default().fg(Color::Gray)),
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {glyph} "), style),
                Span::raw(row.detail.as_str()),
            ]));
        }
        for entry in &self.entries {
            let style = match entry.level {
                LogLevel::Info => Style::default().fg(Color::White),
                LogLevel::Success => Style::default().fg(Color::Green),
                LogLevel::Warn => Style::default().fg(Color::Yellow),
                LogLevel::Error => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.ts),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.text.as_str(), style),
            ]));
        }
        lines
    }

    fn visible_scroll(&self, height: u16) -> u16 {
        let total = self.steps.len() + self.entries.len();
        let visible = height.saturating_sub(2) as usize;
        if self.follow {
            total.saturating_sub(visible) as u16
        } else {
            self.scroll.min(total.saturating_sub(1)) as u16
        }
    }
}

impl Panel for OutputPanel {
    fn title(&self) -> String {
        if self.op_title.is_empty() {
            "Output".to_string()
        } else {
            format!("Output - {}", self.op_title)
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let total = self.steps.len() + self.entries.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.follow = false;
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(total.saturating_sub(1));
                if self.scroll + 1 >= total {
                    self.follow = true;
                }
            }
            KeyCode::PageUp => {
                self.follow = false;
                self.scroll = self.scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.scroll = (self.scroll + 10).min(total.saturating_sub(1));
            }
            KeyCode::End => {
                self.follow = true;
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        let scroll = self.visible_scroll(area.height);
        frame.render_widget(
            Paragraph::new(self.lines()).block(block).scroll((scroll, 0)),
            area,
        );
    }
}
