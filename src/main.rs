//! Binary entry point: load the document, run the viewer, map exit codes.

use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tilde_tui::{run, Document, EnvConfig, Error, Line, ProcessConsole};

/// File-loading collaborator: an ordered sequence of terminator-stripped
/// lines, or a fatal error for the whole process.
fn load_document(path: &Path) -> Result<Document, Error> {
    let bytes = fs::read(path).map_err(|source| Error::FileLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines: Vec<Line> = bytes
        .split(|&byte| byte == b'\n')
        .map(|line| Line::new(line.strip_suffix(b"\r").unwrap_or(line).to_vec()))
        .collect();
    // A trailing newline terminates the last line rather than opening an
    // empty one.
    if lines.last().is_some_and(Line::is_empty) {
        lines.pop();
    }
    Ok(Document::new(lines))
}

fn main() -> ExitCode {
    let document = match env::args().nth(1) {
        Some(path) => match load_document(Path::new(&path)) {
            Ok(document) => document,
            Err(err) => {
                eprintln!("tilde: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Document::default(),
    };

    let console = ProcessConsole::new(&EnvConfig::from_env());
    match run(console, document) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The guard inside `run` has already cleared the screen and
            // restored the terminal, so the diagnostic echoes normally.
            eprintln!("tilde: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::load_document;
    use std::io::Write;

    #[test]
    fn loader_strips_line_terminators() {
        let mut file = tempfile_path("tilde_loader_crlf");
        write!(file.file, "one\r\ntwo\nthree").expect("write");
        let document = load_document(&file.path).expect("load");
        assert_eq!(document.line_count(), 3);
        assert_eq!(document.line(0).map(|l| l.as_bytes()), Some(b"one".as_slice()));
        assert_eq!(document.line(1).map(|l| l.as_bytes()), Some(b"two".as_slice()));
        assert_eq!(document.line(2).map(|l| l.as_bytes()), Some(b"three".as_slice()));
    }

    #[test]
    fn trailing_newline_does_not_add_an_empty_line() {
        let mut file = tempfile_path("tilde_loader_trailing");
        write!(file.file, "only\n").expect("write");
        let document = load_document(&file.path).expect("load");
        assert_eq!(document.line_count(), 1);
    }

    #[test]
    fn missing_file_is_a_file_load_error() {
        let err = load_document(std::path::Path::new("/nonexistent/tilde-test"))
            .expect_err("must fail");
        assert!(err.to_string().contains("cannot load"));
    }

    struct TempFile {
        path: std::path::PathBuf,
        file: std::fs::File,
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn tempfile_path(stem: &str) -> TempFile {
        let path = std::env::temp_dir().join(format!("{stem}-{}", std::process::id()));
        let file = std::fs::File::create(&path).expect("create temp file");
        TempFile { path, file }
    }
}
