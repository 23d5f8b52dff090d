use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use super::{Panel, panel_block};

/// Which list panel the Details panel mirrors. A discriminant, not a
/// reference: the App re-derives the displayed lines whenever focus or the
/// source selection changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::tui_shell) enum DetailsSource {
    #[default]
    Configs,
    Health,
    Overrides,
    External,
    Output,
}

impl DetailsSource {
    pub(in crate::tui_shell) fn label(self) -> &'static str {
        match self {
            DetailsSource::Configs => "config",
            DetailsSource::Health => "check",
            DetailsSource::Overrides => "override",
            DetailsSource::External => "external",
            DetailsSource::Output => "output",
        }
    }
}

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct DetailsPanel {
    pub(in crate::tui_shell) source: DetailsSource,
    pub(in crate::tui_shell) lines: Vec<String>,
    scroll: usize,
    focused: bool,
}

impl DetailsPanel {
    pub(in crate::tui_shell) fn set_context(&mut self, source: DetailsSource, lines: Vec<String>) {
        self.source = source;
        self.lines = lines;
        self.scroll = 0;
    }
}

impl Panel for DetailsPanel {
    fn title(&self) -> String {
        format!("Details ({})", self.source.label())
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(self.lines.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        let lines: Vec<Line> = self.lines.iter().map(|s| Line::from(s.as_str())).collect();
        let paragraph = if lines.is_empty() {
            Paragraph::new("nothing selected").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(lines).scroll((self.scroll as u16, 0))
        };
        frame.render_widget(paragraph.wrap(Wrap { trim: false }).block(block), area);
    }
}
