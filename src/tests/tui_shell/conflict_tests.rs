use super::*;

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn files() -> Vec<ConflictFile> {
    vec![
        ConflictFile {
            config: "vim".to_string(),
            path: PathBuf::from("/home/u/.vimrc"),
        },
        ConflictFile {
            config: "vim".to_string(),
            path: PathBuf::from("/home/u/.vim"),
        },
        ConflictFile {
            config: "tmux".to_string(),
            path: PathBuf::from("/home/u/.tmux.conf"),
        },
    ]
}

fn resolved(outcome: ConflictOutcome) -> ConflictChoice {
    match outcome {
        ConflictOutcome::Resolved(choice) => choice,
        ConflictOutcome::None => panic!("expected a resolution"),
    }
}

#[test]
fn enter_defaults_to_cancel() {
    let mut v = ConflictView::new(files());
    assert_eq!(resolved(v.handle_key(key(KeyCode::Enter))), ConflictChoice::Cancel);
}

#[test]
fn cursor_moves_and_commits() {
    let mut v = ConflictView::new(files());
    v.handle_key(key(KeyCode::Left));
    v.handle_key(key(KeyCode::Left));
    assert_eq!(resolved(v.handle_key(key(KeyCode::Enter))), ConflictChoice::Backup);

    let mut v = ConflictView::new(files());
    v.handle_key(key(KeyCode::Left));
    assert_eq!(resolved(v.handle_key(key(KeyCode::Enter))), ConflictChoice::Delete);
}

#[test]
fn shortcut_letters_resolve_directly() {
    assert_eq!(
        resolved(ConflictView::new(files()).handle_key(key(KeyCode::Char('b')))),
        ConflictChoice::Backup
    );
    assert_eq!(
        resolved(ConflictView::new(files()).handle_key(key(KeyCode::Char('d')))),
        ConflictChoice::Delete
    );
    assert_eq!(
        resolved(ConflictView::new(files()).handle_key(key(KeyCode::Esc))),
        ConflictChoice::Cancel
    );
}

#[test]
fn grouped_lines_emit_one_header_per_config() {
    let v = ConflictView::new(files());
    let lines = v.grouped_lines();
    // 2 config headers + 3 file lines.
    assert_eq!(lines.len(), 5);
}
