//! Where `puts` output goes.
//!
//! The destination set is closed, so [`PrintHandler`] is an enum rather than
//! a trait object. Handlers are `Arc`-shared with the host, which may read
//! captured lines from another thread.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

pub enum PrintHandler {
    /// Process standard output (the default).
    Stdout,
    /// In-memory capture, one entry per printed line.
    Capture(Mutex<Vec<String>>),
    /// Discard everything.
    Silent,
}

impl PrintHandler {
    /// Write `msg` followed by a newline.
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not an evaluation error.
                if let Err(err) = writeln!(out, "{msg}") {
                    tracing::debug!(%err, "stdout write failed");
                }
            }
            PrintHandler::Capture(lines) => lines.lock().push(msg.to_owned()),
            PrintHandler::Silent => {}
        }
    }

    /// Captured lines in print order. Empty unless capturing.
    pub fn lines(&self) -> Vec<String> {
        match self {
            PrintHandler::Capture(lines) => lines.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => Vec::new(),
        }
    }

    /// Captured output as text, every line newline-terminated.
    pub fn get_output(&self) -> String {
        self.lines().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    pub fn clear(&self) {
        if let PrintHandler::Capture(lines) = self {
            lines.lock().clear();
        }
    }
}

/// Print handler shared between the interpreter and its host.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Capture(Mutex::new(Vec::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
