use crossterm::event::KeyCode;

/// Global key bindings, built once at startup and passed by reference into
/// the dispatch loop. Never mutated after construction.
#[derive(Clone, Debug)]
pub(super) struct KeyMap {
    pub(super) quit: KeyCode,
    pub(super) menu: KeyCode,
    pub(super) refresh: KeyCode,
    pub(super) sync: KeyCode,
    pub(super) bulk_sync: KeyCode,
    pub(super) doctor: KeyCode,
    pub(super) update: KeyCode,
    pub(super) install: KeyCode,
    pub(super) cycle: KeyCode,
    pub(super) cycle_back: KeyCode,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyCode::Char('q'),
            menu: KeyCode::Char('m'),
            refresh: KeyCode::Char('r'),
            sync: KeyCode::Char('s'),
            bulk_sync: KeyCode::Char('S'),
            doctor: KeyCode::Char('d'),
            update: KeyCode::Char('u'),
            install: KeyCode::Char('i'),
            cycle: KeyCode::Tab,
            cycle_back: KeyCode::BackTab,
        }
    }
}
