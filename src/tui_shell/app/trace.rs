use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;
use serde_json::json;

use super::App;

/// Append-only JSONL session trace. One line per event, flushed
/// immediately so a crash never loses the tail.
#[derive(Debug)]
pub(super) struct TraceWriter {
    out: BufWriter<File>,
    seq: u64,
}

impl TraceWriter {
    fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create trace directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            seq: 0,
        })
    }

    fn write_event<T: Serialize>(&mut self, event: &str, payload: T) -> Result<()> {
        self.seq += 1;
        let line = json!({
            "seq": self.seq,
            "ts": crate::links::now_rfc3339(),
            "event": event,
            "payload": payload,
        });
        serde_json::to_writer(&mut self.out, &line).context("serialize trace event")?;
        self.out.write_all(b"\n").context("write trace newline")?;
        self.out.flush().context("flush trace event")?;
        Ok(())
    }
}

impl App {
    pub(super) fn enable_trace(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        match TraceWriter::open(&path) {
            Ok(writer) => {
                self.trace = Some(writer);
                self.trace_event(
                    "session_start",
                    json!({
                        "root": self.repo.as_ref().map(|r| r.root.display().to_string()),
                        "view": format!("{:?}", self.view.id()),
                    }),
                );
            }
            Err(err) => {
                self.panels.output.log(
                    super::super::panels::LogLevel::Warn,
                    format!("trace disabled: {err:#}"),
                );
            }
        }
    }

    pub(super) fn trace_event<T: Serialize>(&mut self, event: &str, payload: T) {
        let Some(writer) = self.trace.as_mut() else {
            return;
        };
        // A broken trace file disables tracing instead of failing the UI.
        if writer.write_event(event, payload).is_err() {
            self.trace = None;
        }
    }

    pub(super) fn trace_key(&mut self, key: KeyEvent) {
        if self.trace.is_none() {
            return;
        }
        let view = format!("{:?}", self.view.id());
        self.trace_event(
            "key",
            json!({ "key": key_to_string(&key), "view": view }),
        );
    }

    pub(super) fn trace_session_end(&mut self) {
        let result = self
            .result
            .as_ref()
            .map(|r| format!("{:?}", r.action))
            .unwrap_or_else(|| "quit".to_string());
        self.trace_event("session_end", json!({ "result": result }));
    }
}

fn key_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt".to_string());
    }
    let code = match key.code {
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => "other".to_string(),
    };
    parts.push(code);
    parts.join("+")
}
