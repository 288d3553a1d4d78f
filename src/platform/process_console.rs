//! libc-backed console over the process stdin/stdout.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::c_int;
use signal_hook::SigId;

use crate::config::EnvConfig;
use crate::core::terminal::Console;
use crate::error::{Error, Result};

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_row, size.ws_col))
    } else {
        None
    }
}

fn write_all_fd(fd: c_int, bytes: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < bytes.len() {
        let remaining = &bytes[written..];
        let result =
            unsafe { libc::write(fd, remaining.as_ptr() as *const libc::c_void, remaining.len()) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
        }
        written += result as usize;
    }
    Ok(())
}

/// Parse a `ESC [ rows ; cols R` cursor-position report.
fn parse_cursor_report(buf: &[u8]) -> Option<(u16, u16)> {
    let body = buf.strip_prefix(b"\x1b[".as_slice())?;
    let body = body.strip_suffix(b"R")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Terminal mode controller and raw byte channel for the real terminal.
///
/// `acquire` captures the original termios once and applies the raw
/// configuration; `release` restores the capture. Reads come back within
/// 100 ms with or without data (VMIN=0, VTIME=1), which is what keeps the
/// event loop from blocking indefinitely.
pub struct ProcessConsole {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    resize_flag: Arc<AtomicBool>,
    resize_signal: Option<SigId>,
    write_log_path: Option<PathBuf>,
    write_log_failed: bool,
}

impl ProcessConsole {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
            resize_flag: Arc::new(AtomicBool::new(false)),
            resize_signal: None,
            write_log_path: config.write_log.as_ref().map(PathBuf::from),
            write_log_failed: false,
        }
    }

    fn apply_raw_mode(&mut self) -> io::Result<()> {
        if self.original_termios.is_none() {
            self.original_termios = Some(get_termios(self.stdin_fd)?);
        }
        let mut raw = *self
            .original_termios
            .as_ref()
            .expect("original termios missing");

        // No break SIGINT, no CR->NL translation, no parity check, no 8th
        // bit stripping, no Ctrl-S/Ctrl-Q flow control.
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        // No NL->CRNL output translation.
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        // No echo, no canonical line buffering, no Ctrl-V, no Ctrl-C/Ctrl-Z
        // signals.
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        // read() returns as soon as one byte arrives, or empty after 100 ms.
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1;

        set_termios(self.stdin_fd, &raw)
    }

    /// Query the cursor position by asking the terminal to report it.
    fn cursor_position(&mut self) -> io::Result<Option<(u16, u16)>> {
        self.write_all(b"\x1b[6n")?;

        let mut buf = Vec::with_capacity(32);
        while buf.len() < 31 {
            let Some(byte) = self.read_byte()? else {
                break;
            };
            buf.push(byte);
            if byte == b'R' {
                break;
            }
        }
        Ok(parse_cursor_report(&buf))
    }

    fn log_write(&mut self, bytes: &[u8]) {
        if self.write_log_failed {
            return;
        }
        if let Some(path) = self.write_log_path.as_ref() {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| file.write_all(bytes));
            if result.is_err() {
                self.write_log_failed = true;
            }
        }
    }
}

impl Console for ProcessConsole {
    fn acquire(&mut self) -> Result<()> {
        self.apply_raw_mode().map_err(Error::TerminalConfig)?;

        if self.resize_signal.is_none() {
            let sig_id = signal_hook::flag::register(
                signal_hook::consts::SIGWINCH,
                Arc::clone(&self.resize_flag),
            )
            .map_err(Error::TerminalConfig)?;
            self.resize_signal = Some(sig_id);
        }
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        if let Some(sig_id) = self.resize_signal.take() {
            signal_hook::low_level::unregister(sig_id);
        }
        if let Some(original) = self.original_termios.take() {
            set_termios(self.stdin_fd, &original)?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        let result = unsafe { libc::read(self.stdin_fd, &mut byte as *mut u8 as *mut _, 1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            // A signal (SIGWINCH) or an empty non-blocking read is the same
            // as a timeout from the caller's point of view.
            return match err.kind() {
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                _ => Err(err),
            };
        }
        if result == 0 {
            return Ok(None);
        }
        Ok(Some(byte))
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        write_all_fd(self.stdout_fd, bytes)?;
        self.log_write(bytes);
        Ok(())
    }

    fn window_size(&mut self) -> Result<(u16, u16)> {
        if let Some(size) = read_winsize(self.stdout_fd) {
            return Ok(size);
        }

        // Fallback: push the cursor to the bottom-right extreme and read its
        // reported position back.
        self.write_all(b"\x1b[999C\x1b[999B")
            .map_err(Error::WindowSize)?;
        match self.cursor_position().map_err(Error::WindowSize)? {
            Some(size) => Ok(size),
            None => Err(Error::WindowSize(io::Error::new(
                io::ErrorKind::InvalidData,
                "malformed cursor position report",
            ))),
        }
    }

    fn take_resize(&mut self) -> bool {
        self.resize_flag.swap(false, Ordering::SeqCst)
    }
}

impl Drop for ProcessConsole {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
