mod config_list;
mod confirm;
mod conflict;
mod external;
mod machine;
mod menu;
mod onboarding;

pub(super) use config_list::{ConfigListOutcome, ConfigListView};
pub(super) use confirm::{ConfirmKind, ConfirmOutcome, ConfirmView};
pub(super) use conflict::{ConflictChoice, ConflictOutcome, ConflictView};
pub(super) use external::{ExternalOutcome, ExternalView};
pub(super) use machine::{MachineOutcome, MachineView};
pub(super) use menu::{MenuAction, MenuOutcome, MenuView};
pub(super) use onboarding::{OnboardingOutcome, OnboardingView};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear};

/// Full-screen mode identity. Exactly one view is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ViewId {
    Dashboard,
    Menu,
    NoConfig,
    Operation,
    Onboarding,
    Confirm,
    ConfigList,
    External,
    Machine,
    Conflict,
}

/// The active view plus its private sub-state. The navigation layer never
/// reaches into the sub-state; it reacts only to each view's terminal
/// outcome message.
#[derive(Debug)]
pub(super) enum ViewState {
    Dashboard,
    Menu(MenuView),
    NoConfig,
    Operation,
    Onboarding(OnboardingView),
    Confirm(ConfirmView),
    ConfigList(ConfigListView),
    External(ExternalView),
    Machine(MachineView),
    Conflict(ConflictView),
}

impl ViewState {
    pub(super) fn id(&self) -> ViewId {
        match self {
            ViewState::Dashboard => ViewId::Dashboard,
            ViewState::Menu(_) => ViewId::Menu,
            ViewState::NoConfig => ViewId::NoConfig,
            ViewState::Operation => ViewId::Operation,
            ViewState::Onboarding(_) => ViewId::Onboarding,
            ViewState::Confirm(_) => ViewId::Confirm,
            ViewState::ConfigList(_) => ViewId::ConfigList,
            ViewState::External(_) => ViewId::External,
            ViewState::Machine(_) => ViewId::Machine,
            ViewState::Conflict(_) => ViewId::Conflict,
        }
    }
}

/// Centered modal box over whatever is beneath, key hints in the title.
pub(super) fn modal_area(frame: &Frame, max_w: u16, max_h: u16) -> Rect {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, max_w);
    let h = area.height.saturating_sub(6).clamp(6, max_h);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

pub(super) fn modal_block(title: &str, hints: &[&str]) -> Block<'static> {
    let mut spans = vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    )];
    for hint in hints {
        spans.push(Span::raw("  ".to_string()));
        spans.push(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    Block::default().borders(Borders::ALL).title(Line::from(spans))
}

pub(super) fn draw_modal_frame(frame: &mut Frame, area: Rect, block: &Block) -> Rect {
    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    block.inner(area)
}
