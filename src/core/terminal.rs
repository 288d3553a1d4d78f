//! Console seam and scoped raw-mode acquisition.
//!
//! Invariant: the original terminal configuration is captured once per
//! process and restored exactly once, on every exit path. Code paths that
//! hold raw mode must do so through [`ConsoleGuard`].

use std::io;

use crate::error::Result;

/// Minimal terminal interface for the viewer.
///
/// The production implementation is `platform::ProcessConsole`; tests drive
/// the decoder, compositor, and event loop through scripted fakes.
pub trait Console {
    /// Capture the current terminal state and switch to raw mode.
    ///
    /// Raw mode disables echo and line buffering, delivers Ctrl-C/Ctrl-Z/
    /// Ctrl-V/Ctrl-S/Ctrl-Q as plain bytes, turns off CR/NL translation,
    /// and arms the 100 ms byte-read timeout.
    fn acquire(&mut self) -> Result<()>;

    /// Restore the state captured by [`Console::acquire`].
    fn release(&mut self) -> io::Result<()>;

    /// Read one byte; `Ok(None)` means the read timed out with no data.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Write bytes to the terminal.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Current window size as `(rows, cols)`.
    fn window_size(&mut self) -> Result<(u16, u16)>;

    /// Whether the window was resized since the last call.
    fn take_resize(&mut self) -> bool {
        false
    }
}

/// RAII guard that clears the screen and restores the terminal on drop.
///
/// Dropping covers normal return, user quit, propagated fatal errors, and
/// panics, so no control path can leave the shell in raw mode.
pub struct ConsoleGuard<C: Console> {
    console: Option<C>,
}

impl<C: Console> ConsoleGuard<C> {
    /// Switch the console to raw mode and wrap it.
    pub fn acquire(mut console: C) -> Result<Self> {
        console.acquire()?;
        Ok(Self {
            console: Some(console),
        })
    }

    /// Access the wrapped console.
    pub fn console_mut(&mut self) -> &mut C {
        self.console
            .as_mut()
            .expect("console already taken from guard")
    }

    /// Consume the guard without clearing or restoring.
    pub fn into_inner(mut self) -> C {
        self.console
            .take()
            .expect("console already taken from guard")
    }
}

impl<C: Console> Drop for ConsoleGuard<C> {
    fn drop(&mut self) {
        if let Some(console) = self.console.as_mut() {
            // Best effort: a failed write must not stop the restore.
            let _ = console.write_all(b"\x1b[2J\x1b[H");
            let _ = console.release();
        }
    }
}
