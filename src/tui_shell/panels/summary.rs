use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Panel, panel_block};

/// Display-only mini panel: aggregate link health and the last sync time.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct SummaryPanel {
    pub(in crate::tui_shell) linked: usize,
    pub(in crate::tui_shell) missing: usize,
    pub(in crate::tui_shell) drifted: usize,
    pub(in crate::tui_shell) conflicted: usize,
    pub(in crate::tui_shell) externals_installed: usize,
    pub(in crate::tui_shell) externals_total: usize,
    pub(in crate::tui_shell) last_sync: Option<String>,
    focused: bool,
}

impl Panel for SummaryPanel {
    fn title(&self) -> String {
        "Summary".to_string()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(&self.title(), self.focused);
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{} linked", self.linked),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} missing", self.missing),
                Style::default().fg(Color::Gray),
            ),
        ])];
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} drifted", self.drifted),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} conflicts", self.conflicted),
                Style::default().fg(Color::Red),
            ),
        ]));
        lines.push(Line::from(format!(
            "external {}/{}",
            self.externals_installed, self.externals_total
        )));
        if let Some(ts) = &self.last_sync {
            lines.push(Line::from(Span::styled(
                format!("last sync {ts}"),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
