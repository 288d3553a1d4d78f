//! Fatal error kinds.
//!
//! Every variant is a broken environment precondition: none of them is
//! recoverable inside the viewer, so they all propagate to `main`, which
//! restores the terminal before printing a diagnostic and exiting non-zero.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// Querying or applying the terminal configuration failed.
    TerminalConfig(io::Error),
    /// Both the ioctl size query and the cursor-position fallback failed.
    WindowSize(io::Error),
    /// The document path could not be read.
    FileLoad { path: PathBuf, source: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TerminalConfig(err) => write!(f, "terminal configuration failed: {err}"),
            Error::WindowSize(err) => write!(f, "window size query failed: {err}"),
            Error::FileLoad { path, source } => {
                write!(f, "cannot load {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TerminalConfig(err) | Error::WindowSize(err) => Some(err),
            Error::FileLoad { source, .. } => Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
