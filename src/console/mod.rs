//! Console - severity-styled text output
//!
//! Every command writes through the [`Console`] capability instead of touching
//! stdout directly, so output can be rendered to a terminal, captured in tests or
//! forwarded to structured logs.
//!
//! ```text
//! command handler
//!     │  emit(text, Some(Severity::Success))
//!     ▼
//! Console ──┬── TerminalConsole  (ANSI colours on a tty)
//!           ├── CaptureConsole   (fragments kept in memory)
//!           └── LogConsole       (one tracing event per line)
//! ```

mod capture;

pub use capture::{CaptureConsole, Fragment};

use std::io::{self, IsTerminal, Stdout, Write};

/// Visual class of a piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Information,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Information => "information",
        }
    }

    fn ansi_code(&self) -> &'static str {
        match self {
            Severity::Success => "32",
            Severity::Warning => "31",
            Severity::Information => "33",
        }
    }
}

/// Line-oriented output sink. `None` severity means unstyled text.
pub trait Console {
    /// Append a fragment to the current line.
    fn emit(&mut self, text: &str, severity: Option<Severity>);

    /// Terminate the current line.
    fn end_line(&mut self);

    fn line(&mut self, text: &str) {
        self.emit(text, None);
        self.end_line();
    }

    fn success(&mut self, text: &str) {
        self.emit(text, Some(Severity::Success));
        self.end_line();
    }

    fn warning(&mut self, text: &str) {
        self.emit(text, Some(Severity::Warning));
        self.end_line();
    }

    fn information(&mut self, text: &str) {
        self.emit(text, Some(Severity::Information));
        self.end_line();
    }

    fn blank(&mut self) {
        self.end_line();
    }

    /// Styled fragment left-aligned in a column of `width` characters.
    fn emit_padded(&mut self, text: &str, width: usize, severity: Option<Severity>) {
        self.emit(&format!("{:<width$}", text, width = width), severity);
    }
}

/// ANSI renderer over any writer (stdout by default).
pub struct TerminalConsole<W: Write = Stdout> {
    out: W,
    color: bool,
}

impl TerminalConsole<Stdout> {
    /// Stdout console; colours only on a terminal and when `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { out, color }
    }
}

impl<W: Write> TerminalConsole<W> {
    pub fn with_writer(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the prompt text without a newline and flush.
    pub fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        self.out.flush().ok();
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn emit(&mut self, text: &str, severity: Option<Severity>) {
        let _ = match severity {
            Some(s) if self.color => write!(self.out, "\x1b[{}m{}\x1b[0m", s.ansi_code(), text),
            _ => write!(self.out, "{}", text),
        };
    }

    fn end_line(&mut self) {
        let _ = writeln!(self.out);
        self.out.flush().ok();
    }
}

/// Forwards each completed line to `tracing`. Warning lines log at WARN, the
/// rest at INFO.
#[derive(Debug, Default)]
pub struct LogConsole {
    buffer: String,
    severity: Option<Severity>,
}

impl LogConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for LogConsole {
    fn emit(&mut self, text: &str, severity: Option<Severity>) {
        self.buffer.push_str(text);
        // A warning fragment marks the whole line.
        if severity.is_some() && self.severity != Some(Severity::Warning) {
            self.severity = severity;
        }
    }

    fn end_line(&mut self) {
        let line = std::mem::take(&mut self.buffer);
        let severity = self.severity.take();
        if line.is_empty() {
            return;
        }
        let class = severity.map(|s| s.as_str()).unwrap_or("plain");
        match severity {
            Some(Severity::Warning) => tracing::warn!(severity = class, "{}", line),
            _ => tracing::info!(severity = class, "{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_writer_has_no_escape_codes() {
        let mut console = TerminalConsole::with_writer(Vec::new(), false);
        console.emit("Available balance: ", None);
        console.emit("1.0000 BLOC", Some(Severity::Success));
        console.end_line();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "Available balance: 1.0000 BLOC\n");
    }

    #[test]
    fn test_colour_wraps_only_styled_fragment() {
        let mut console = TerminalConsole::with_writer(Vec::new(), true);
        console.emit("Total balance: ", None);
        console.emit("5", Some(Severity::Information));
        console.end_line();
        console.warning("stuck");
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "Total balance: \x1b[33m5\x1b[0m\n\x1b[31mstuck\x1b[0m\n");
    }

    #[test]
    fn test_padding_applies_inside_style() {
        let mut console = TerminalConsole::with_writer(Vec::new(), false);
        console.emit_padded("help", 10, Some(Severity::Success));
        console.emit("List this help message", None);
        console.end_line();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "help      List this help message\n");
    }

    #[test]
    fn test_log_console_warning_marks_whole_line() {
        let mut console = LogConsole::new();
        console.emit("Local blockchain height: ", None);
        console.emit("90", Some(Severity::Warning));
        console.emit(" ", Some(Severity::Success));
        assert_eq!(console.severity, Some(Severity::Warning));
        console.end_line();
        assert!(console.buffer.is_empty());
        assert_eq!(console.severity, None);
    }
}
