#[cfg(unix)]
pub mod process_console;

#[cfg(unix)]
pub use process_console::ProcessConsole;
