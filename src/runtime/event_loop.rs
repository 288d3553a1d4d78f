//! The viewer's single thread of control.
//!
//! Strictly sequential: render a frame, decode one key, apply it, repeat.
//! Raw mode is held through a [`ConsoleGuard`], so every way out of the
//! loop, including propagated errors and panics, restores the terminal.

use crate::core::document::Document;
use crate::core::key::{ctrl, read_key, KeyEvent};
use crate::core::terminal::{Console, ConsoleGuard};
use crate::error::{Error, Result};
use crate::render::renderer::render_frame;
use crate::runtime::editor::{Direction, EditorState};

const QUIT: u8 = ctrl(b'q');

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the viewer over `console` until the user quits.
///
/// Returns `Ok(())` on Ctrl-Q; any fatal error propagates after the guard
/// has cleared the screen and restored the terminal.
pub fn run<C: Console>(console: C, document: Document) -> Result<()> {
    let mut guard = ConsoleGuard::acquire(console)?;
    let console = guard.console_mut();

    let (rows, cols) = console.window_size()?;
    let mut state = EditorState::new(rows as usize, cols as usize);

    loop {
        if console.take_resize() {
            let (rows, cols) = console.window_size()?;
            state.resize(rows as usize, cols as usize);
        }

        state.scroll();
        render_frame(&state, &document)
            .flush(console)
            .map_err(Error::TerminalConfig)?;

        let key = read_key(console).map_err(Error::TerminalConfig)?;
        if apply_key(&mut state, &document, key) == Flow::Quit {
            return Ok(());
        }
    }
}

/// Dispatch one key event to the viewport.
///
/// Keys without a viewer action (Delete, Escape, plain characters, other
/// control bytes) are absorbed as no-ops; malformed input never stops the
/// loop.
fn apply_key(state: &mut EditorState, document: &Document, key: KeyEvent) -> Flow {
    match key {
        KeyEvent::ControlChar(QUIT) => return Flow::Quit,
        KeyEvent::ArrowUp => state.move_cursor(Direction::Up, document),
        KeyEvent::ArrowDown => state.move_cursor(Direction::Down, document),
        KeyEvent::ArrowLeft => state.move_cursor(Direction::Left, document),
        KeyEvent::ArrowRight => state.move_cursor(Direction::Right, document),
        KeyEvent::Home => state.jump_home(),
        KeyEvent::End => state.jump_end(document),
        KeyEvent::PageUp => state.page_move(Direction::Up, document),
        KeyEvent::PageDown => state.page_move(Direction::Down, document),
        KeyEvent::Delete
        | KeyEvent::Escape
        | KeyEvent::Character(_)
        | KeyEvent::ControlChar(_) => {}
    }
    Flow::Continue
}
