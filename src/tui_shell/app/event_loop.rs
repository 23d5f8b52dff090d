use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::App;

/// Synchronous dispatch loop: drain worker messages, draw, then block on
/// input for at most 50ms so spinner ticks and worker progress stay live.
pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        loop {
            let msg = match app.msg_rx.try_recv() {
                Ok(msg) => msg,
                Err(_) => break,
            };
            app.handle_msg(msg);
        }

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => super::keys::handle_key(app, k),
                _ => {}
            }
        } else if app.op_active {
            app.panels.output.tick();
        }
    }
}
