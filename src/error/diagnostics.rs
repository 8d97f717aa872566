use std::io::Write;

use crate::{error::RuntimeError, interpreter::lexer::Location};

/// Selects the prefix of a reported message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Position {
    /// `line.column message`
    Column(Location),
    /// `line message`
    Line(usize),
    /// `message`
    Bare,
}

/// Collects recoverable errors reported while building a program.
///
/// Reporting never stops anything; it records the formatted message and
/// remembers that an error happened. The caller decides what to do with the
/// messages once parsing is over.
///
/// ## Example
/// ```
/// use mikroc::{
///     error::{Diagnostics, Position},
///     interpreter::lexer::Location,
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// assert!(!diagnostics.had_errors());
///
/// diagnostics.report("unexpected ')'", Position::Column(Location { line: 3, column: 7 }));
/// diagnostics.report("lvalue required", Position::Line(4));
/// diagnostics.report("giving up", Position::Bare);
///
/// assert!(diagnostics.had_errors());
/// assert_eq!(diagnostics.messages(),
///            ["3.7 unexpected ')'", "4 lvalue required", "giving up"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    messages:   Vec<String>,
    had_errors: bool,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message`, prefixed according to `position`.
    pub fn report(&mut self, message: &str, position: Position) {
        self.had_errors = true;

        let formatted = match position {
            Position::Column(Location { line, column }) => format!("{line}.{column} {message}"),
            Position::Line(line) => format!("{line} {message}"),
            Position::Bare => message.to_string(),
        };
        tracing::debug!(message = %formatted, "diagnostic reported");
        self.messages.push(formatted);
    }

    /// Whether anything has been reported.
    #[must_use]
    pub const fn had_errors(&self) -> bool {
        self.had_errors
    }

    /// Every reported message, in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Terminates the process because of an unrecoverable runtime error.
///
/// Program output written so far is flushed, the diagnostic is printed to
/// standard error on a fresh line and the process aborts without unwinding.
pub fn abort_fatal(error: &RuntimeError) -> ! {
    tracing::error!(%error, "fatal runtime error");

    let _ = std::io::stdout().flush();
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "\n{error}");
    let _ = stderr.flush();

    std::process::abort()
}
