//! Full-screen terminal handling shared by the picker and the wizard.
//!
//! Everything is drawn on stderr so that stdout only ever carries the
//! printed command.

use std::io::{stderr, BufWriter, Stderr};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};

/// Room for one full redraw, so a frame reaches the terminal in one write.
const FRAME_BUFFER_CAPACITY: usize = 64 * 1024;

fn buffered_stderr() -> BufWriter<Stderr> {
    BufWriter::with_capacity(FRAME_BUFFER_CAPACITY, stderr())
}

/// Raw mode plus the alternate screen, undone on drop.
pub struct ScreenGuard {
    mouse: bool,
}

impl ScreenGuard {
    /// Switch to the alternate screen and enable raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal rejects either switch.
    pub fn enter(mouse: bool) -> std::io::Result<Self> {
        let mut err = stderr();
        execute!(err, EnterAlternateScreen)?;
        // From here on the guard restores whatever was switched
        let guard = Self { mouse };
        enable_raw_mode()?;
        if mouse {
            execute!(err, EnableMouseCapture)?;
        }
        Ok(guard)
    }

    /// Buffered stderr. Nothing reaches the terminal until `flush`.
    pub fn writer(&self) -> BufWriter<Stderr> {
        buffered_stderr()
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut err = stderr();
        if self.mouse {
            let _ = execute!(err, DisableMouseCapture);
        }
        let _ = execute!(err, cursor::Show, LeaveAlternateScreen);
    }
}
