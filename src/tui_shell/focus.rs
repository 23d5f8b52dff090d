use super::panel::PanelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FocusMove {
    Left,
    Right,
    Up,
    Down,
}

/// Spatial layout of the dashboard. Output spans the bottom row.
const GRID: [[PanelId; 3]; 3] = [
    [PanelId::Summary, PanelId::Health, PanelId::Overrides],
    [PanelId::Configs, PanelId::External, PanelId::Details],
    [PanelId::Output, PanelId::Output, PanelId::Output],
];

/// Tab order. Display-only mini panels are excluded.
const NAVIGABLE: [PanelId; 5] = [
    PanelId::Configs,
    PanelId::Health,
    PanelId::Overrides,
    PanelId::External,
    PanelId::Output,
];

/// Digit shortcuts: 0 is Output, 1..6 the remaining panels in a stable order.
const JUMP_TABLE: [PanelId; 7] = [
    PanelId::Output,
    PanelId::Summary,
    PanelId::Health,
    PanelId::Overrides,
    PanelId::External,
    PanelId::Configs,
    PanelId::Details,
];

/// Tracks which panel owns input. Exactly one panel is current at all times;
/// the side effects of a change (focus flags, footer, details context) are
/// applied by the App, atomically per input event.
#[derive(Debug)]
pub(super) struct FocusManager {
    current: PanelId,
}

impl FocusManager {
    pub(super) fn new() -> Self {
        Self {
            current: PanelId::Configs,
        }
    }

    pub(super) fn current(&self) -> PanelId {
        self.current
    }

    pub(super) fn set(&mut self, id: PanelId) {
        self.current = id;
    }

    /// Cyclic move over the navigable list; always wraps.
    pub(super) fn cycle_next(&mut self) -> PanelId {
        self.cycle(1)
    }

    pub(super) fn cycle_prev(&mut self) -> PanelId {
        self.cycle(-1)
    }

    fn cycle(&mut self, step: isize) -> PanelId {
        let len = NAVIGABLE.len() as isize;
        let pos = NAVIGABLE
            .iter()
            .position(|&id| id == self.current)
            .map(|p| p as isize)
            // From a non-navigable panel, Tab enters the list at its head
            // and Shift-Tab at its tail.
            .unwrap_or(if step > 0 { -1 } else { 0 });
        let next = (pos + step).rem_euclid(len) as usize;
        self.current = NAVIGABLE[next];
        self.current
    }

    /// Grid move; clamps at edges (no wrap). Returns the (possibly
    /// unchanged) current panel.
    pub(super) fn spatial(&mut self, dir: FocusMove) -> PanelId {
        let Some((row, col)) = position(self.current) else {
            return self.current;
        };
        let (row, col) = (row as isize, col as isize);
        let (nr, nc) = match dir {
            FocusMove::Left => (row, col - 1),
            FocusMove::Right => (row, col + 1),
            FocusMove::Up => (row - 1, col),
            FocusMove::Down => (row + 1, col),
        };
        if nr < 0 || nr >= GRID.len() as isize || nc < 0 || nc >= GRID[0].len() as isize {
            return self.current;
        }
        self.current = GRID[nr as usize][nc as usize];
        self.current
    }

    pub(super) fn jump(&mut self, n: usize) -> Option<PanelId> {
        let id = *JUMP_TABLE.get(n)?;
        self.current = id;
        Some(id)
    }
}

fn position(id: PanelId) -> Option<(usize, usize)> {
    for (r, row) in GRID.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if *cell == id {
                return Some((r, c));
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/tui_shell/focus_tests.rs"]
mod tests;
