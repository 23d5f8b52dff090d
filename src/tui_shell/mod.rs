use anyhow::Result;

mod app;
mod focus;
mod keymap;
mod panel;
mod panels;
mod views;

use crate::tui::{TuiRunOptions, UiResult};

pub fn run(opts: TuiRunOptions) -> Result<UiResult> {
    app::run(opts)
}
