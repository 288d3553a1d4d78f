//! Raw-byte input decoding.
//!
//! Translates the terminal's byte stream, including multi-byte VT100 escape
//! sequences, into one logical [`KeyEvent`] per keypress. A bare escape and
//! an interrupted sequence both decode to [`KeyEvent::Escape`]; the protocol
//! itself cannot distinguish them, so neither does the decoder.

use std::io;

use crate::core::terminal::Console;

const ESCAPE: u8 = 0x1b;

/// Ctrl-modified letter as the terminal delivers it in raw mode.
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

/// One decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Character(u8),
    ControlChar(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Escape,
}

/// Decoder progress after the escape byte.
#[derive(Debug, Clone, Copy)]
enum DecodeState {
    SawEscape,
    SawBracket,
    SawBracketDigit(u8),
    SawO,
}

/// Read one key event from the console.
///
/// Blocks until the first byte arrives (each underlying read is bounded by
/// the console's 100 ms timeout). Escape-sequence follow-up bytes get a
/// single timed read each; a timeout at any point yields `Escape`. Unknown
/// sequences also degrade to `Escape`, never to an error.
pub fn read_key<C: Console>(console: &mut C) -> io::Result<KeyEvent> {
    let first = loop {
        if let Some(byte) = console.read_byte()? {
            break byte;
        }
    };

    if first != ESCAPE {
        return Ok(classify_literal(first));
    }

    let mut state = DecodeState::SawEscape;
    loop {
        let Some(byte) = console.read_byte()? else {
            return Ok(KeyEvent::Escape);
        };
        state = match (state, byte) {
            (DecodeState::SawEscape, b'[') => DecodeState::SawBracket,
            (DecodeState::SawEscape, b'O') => DecodeState::SawO,
            (DecodeState::SawBracket, digit @ b'0'..=b'9') => DecodeState::SawBracketDigit(digit),
            (DecodeState::SawBracket, letter) => return Ok(decode_bracket_letter(letter)),
            (DecodeState::SawBracketDigit(digit), b'~') => return Ok(decode_tilde_digit(digit)),
            (DecodeState::SawBracketDigit(_), _) => return Ok(KeyEvent::Escape),
            (DecodeState::SawO, b'H') => return Ok(KeyEvent::Home),
            (DecodeState::SawO, b'F') => return Ok(KeyEvent::End),
            (DecodeState::SawO, _) | (DecodeState::SawEscape, _) => return Ok(KeyEvent::Escape),
        };
    }
}

fn classify_literal(byte: u8) -> KeyEvent {
    if (1..=26).contains(&byte) {
        KeyEvent::ControlChar(byte)
    } else {
        KeyEvent::Character(byte)
    }
}

fn decode_bracket_letter(letter: u8) -> KeyEvent {
    match letter {
        b'A' => KeyEvent::ArrowUp,
        b'B' => KeyEvent::ArrowDown,
        b'C' => KeyEvent::ArrowRight,
        b'D' => KeyEvent::ArrowLeft,
        b'H' => KeyEvent::Home,
        b'F' => KeyEvent::End,
        _ => KeyEvent::Escape,
    }
}

fn decode_tilde_digit(digit: u8) -> KeyEvent {
    match digit {
        b'1' | b'7' => KeyEvent::Home,
        b'2' | b'8' => KeyEvent::End,
        b'3' => KeyEvent::Delete,
        b'5' => KeyEvent::PageUp,
        b'6' => KeyEvent::PageDown,
        _ => KeyEvent::Escape,
    }
}
