//! Screen compositor.
//!
//! Maps the visible slice of the document through the viewport offsets into
//! a [`Frame`], one text row per screen row. Rendering performs no input
//! decoding and no terminal writes of its own; the caller flushes the
//! returned frame atomically.

use crate::core::document::Document;
use crate::render::frame::Frame;
use crate::runtime::editor::EditorState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compose one full frame for the current viewport.
pub fn render_frame(state: &EditorState, document: &Document) -> Frame {
    let mut frame = Frame::new();
    frame.hide_cursor();
    frame.cursor_home();
    draw_rows(state, document, &mut frame);
    frame.cursor_position(
        state.cursor.row - state.row_offset + 1,
        state.cursor.col - state.col_offset + 1,
    );
    frame.show_cursor();
    frame
}

fn draw_rows(state: &EditorState, document: &Document, frame: &mut Frame) {
    for y in 0..state.screen_rows {
        let file_row = state.row_offset + y;
        if let Some(line) = document.line(file_row) {
            // Clip the line to the visible column window; a line that ends
            // left of the window contributes nothing.
            if state.col_offset < line.len() {
                let visible = &line.as_bytes()[state.col_offset..];
                let width = visible.len().min(state.screen_cols);
                frame.text(&visible[..width]);
            }
        } else if document.is_empty() && y == state.screen_rows / 3 {
            draw_welcome(state, frame);
        } else {
            frame.text(b"~");
        }

        frame.clear_line();
        if y + 1 < state.screen_rows {
            frame.line_break();
        }
    }
}

/// Centered version banner, shown only while no document is loaded.
fn draw_welcome(state: &EditorState, frame: &mut Frame) {
    let welcome = format!("tilde viewer -- version {VERSION}");
    let text = &welcome.as_bytes()[..welcome.len().min(state.screen_cols)];

    let mut padding = (state.screen_cols - text.len()) / 2;
    if padding > 0 {
        frame.text(b"~");
        padding -= 1;
    }
    for _ in 0..padding {
        frame.text(b" ");
    }
    frame.text(text);
}
