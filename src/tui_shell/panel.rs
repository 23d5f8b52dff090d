use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

/// Identity of one dashboard region. Identity only; behavior lives in the
/// panel implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PanelId {
    Summary,
    Health,
    Overrides,
    External,
    Configs,
    Details,
    Output,
}

impl PanelId {
    /// Participates in Tab/Shift-Tab cycling. Summary and Details are
    /// display-only mini panels: they occupy grid cells but are skipped.
    pub(super) fn is_navigable(self) -> bool {
        matches!(
            self,
            PanelId::Configs
                | PanelId::Health
                | PanelId::Overrides
                | PanelId::External
                | PanelId::Output
        )
    }

    /// Accepts raw scroll/cursor input while focused.
    pub(super) fn is_scrollable(self) -> bool {
        matches!(
            self,
            PanelId::Configs
                | PanelId::Health
                | PanelId::Overrides
                | PanelId::External
                | PanelId::Output
                | PanelId::Details
        )
    }
}

/// Uniform contract every displayable region implements.
pub(super) trait Panel {
    fn title(&self) -> String;

    fn set_focused(&mut self, focused: bool);

    /// Scroll/cursor movement only; anything with side effects outside the
    /// panel goes through the dispatch loop.
    fn handle_key(&mut self, _key: KeyEvent) {}

    fn render(&self, frame: &mut Frame, area: Rect);
}

/// Shared bordered-block chrome; focused panels get a highlighted title.
pub(super) fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(Line::from(Span::styled(title.to_string(), style)))
}
