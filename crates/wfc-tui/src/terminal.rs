//! Terminal sink for the console.
//!
//! Implements [`RenderSink`] for a real terminal using crossterm for the
//! raw-mode alternate screen and ratatui for drawing. Key handling lives in
//! [`crate::input`]; this type only draws.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use wfc_app::RenderSink;
use wfc_core::Snapshot;

use crate::ui::{self, ConsoleView};

/// Terminal errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal sink implementing the [`RenderSink`] trait.
///
/// Owns the alternate screen for its whole lifetime and restores the
/// terminal on drop, including when the runtime exits with an error.
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: ConsoleView,
}

impl TerminalSink {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn new(view: ConsoleView) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?.execute(Hide)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal, view })
    }
}

impl RenderSink for TerminalSink {
    type Error = TerminalError;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), TerminalError> {
        self.view.apply(snapshot);
        if snapshot.full {
            self.terminal.clear()?;
        }
        self.terminal.draw(|frame| ui::render(frame, &self.view))?;
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(Show);
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
