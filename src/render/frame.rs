//! Single-buffer output frame.
//!
//! Invariant: one frame, one write. Every control sequence and text run for
//! a render cycle is appended to the in-memory buffer and the whole buffer
//! reaches the terminal through a single `flush`. Nothing else writes
//! during rendering, which is what keeps redraws flicker-free.

use std::io;

use crate::core::terminal::Console;

/// One output frame, assembled fresh each render cycle and discarded after
/// the flush. No diffing against previous frames is performed.
#[derive(Debug, Default)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide_cursor(&mut self) {
        self.buf.extend_from_slice(b"\x1b[?25l");
    }

    pub fn show_cursor(&mut self) {
        self.buf.extend_from_slice(b"\x1b[?25h");
    }

    pub fn cursor_home(&mut self) {
        self.buf.extend_from_slice(b"\x1b[H");
    }

    /// Position the cursor at 1-indexed screen coordinates.
    pub fn cursor_position(&mut self, row: usize, col: usize) {
        self.buf
            .extend_from_slice(format!("\x1b[{row};{col}H").as_bytes());
    }

    /// Erase from the cursor to the end of the current line.
    pub fn clear_line(&mut self) {
        self.buf.extend_from_slice(b"\x1b[K");
    }

    /// Raw-mode line break (OPOST is off, so `\n` alone does not return the
    /// carriage).
    pub fn line_break(&mut self) {
        self.buf.extend_from_slice(b"\r\n");
    }

    pub fn text(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Emit the assembled frame in one write.
    pub fn flush<C: Console>(self, console: &mut C) -> io::Result<()> {
        console.write_all(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn frame_accumulates_in_append_order() {
        let mut frame = Frame::new();
        frame.hide_cursor();
        frame.cursor_home();
        frame.text(b"hello");
        frame.clear_line();
        frame.line_break();
        frame.cursor_position(3, 7);
        frame.show_cursor();

        assert_eq!(
            frame.as_bytes(),
            b"\x1b[?25l\x1b[Hhello\x1b[K\r\n\x1b[3;7H\x1b[?25h"
        );
    }
}
