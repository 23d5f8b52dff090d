use serde_json::json;

use super::super::views::ViewState;
use super::App;

impl App {
    /// Replace the active view, parking the old one (and its sub-state:
    /// cursors, filters, half-typed input) on the stack.
    pub(super) fn push_view(&mut self, next: ViewState) {
        self.trace_event(
            "view_change",
            json!({ "from": format!("{:?}", self.view.id()), "to": format!("{:?}", next.id()) }),
        );
        let prev = std::mem::replace(&mut self.view, next);
        self.view_stack.push(prev);
    }

    /// Restore the most recently parked view. An empty stack lands on the
    /// dashboard rather than panicking on stray Esc presses.
    pub(super) fn pop_view(&mut self) {
        let restored = self.view_stack.pop().unwrap_or(ViewState::Dashboard);
        self.trace_event(
            "view_change",
            json!({
                "from": format!("{:?}", self.view.id()),
                "to": format!("{:?}", restored.id()),
            }),
        );
        self.view = restored;
    }

    /// Jump home, dropping the whole history (used after onboarding).
    pub(super) fn reset_to_dashboard(&mut self) {
        self.view_stack.clear();
        self.view = ViewState::Dashboard;
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/nav_tests.rs"]
mod tests;
