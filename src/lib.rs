//! Terminal text viewer core.
//!
//! Invariant: the terminal is a single exclusive resource. Raw mode is held
//! through [`ConsoleGuard`] so the original configuration is restored on
//! every exit path, and all rendering reaches the device as one atomic
//! frame flush per cycle.
//!
//! # Public API Overview
//! - Decode raw input bytes into [`KeyEvent`]s with [`read_key`].
//! - Hold a [`Document`] and map a cursor over it with [`EditorState`].
//! - Compose frames via [`render_frame`] and run everything with [`run`].

pub mod config;
pub mod error;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;

/// Environment configuration.
pub use crate::config::EnvConfig;

/// Fatal error kinds and the crate result alias.
pub use crate::error::{Error, Result};

/// Document store types.
pub use crate::core::document::{Document, Line};

/// Input decoding.
pub use crate::core::key::{ctrl, read_key, KeyEvent};

/// Terminal seam and scoped raw-mode acquisition.
pub use crate::core::terminal::{Console, ConsoleGuard};

/// Process-backed console implementation.
#[cfg(unix)]
pub use crate::platform::process_console::ProcessConsole;

/// Frame composition.
pub use crate::render::{render_frame, Frame};

/// Viewport model and event loop.
pub use crate::runtime::{run, CursorPos, Direction, EditorState};
