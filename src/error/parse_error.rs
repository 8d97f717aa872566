use thiserror::Error;

use crate::{error::diagnostics::Position, interpreter::lexer::Location};

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Syntax error: unexpected {token}, expected {expected}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// What the parser was looking for.
        expected: &'static str,
        /// Where the token starts.
        location: Location,
    },
    /// Reached the end of input inside an unfinished construct.
    #[error("Syntax error: unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: &'static str,
        /// The end of the source.
        location: Location,
    },
    /// The lexer met text that forms no valid token.
    #[error("Invalid token '{text}'.")]
    InvalidToken {
        /// The offending source text.
        text:     String,
        /// Where it starts.
        location: Location,
    },
    /// The left-hand side of an assignment, `++`, `--` or `scan` is not a
    /// variable.
    #[error("Lvalue required as the operand of '{operator}'.")]
    NotAssignable {
        /// The operator needing a variable.
        operator: &'static str,
        /// Where the operator is.
        location: Location,
    },
}

impl ParseError {
    /// Where in the source the error was detected.
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::UnexpectedToken { location, .. }
            | Self::UnexpectedEndOfInput { location, .. }
            | Self::InvalidToken { location, .. }
            | Self::NotAssignable { location, .. } => *location,
        }
    }

    /// How the error is positioned when reported: syntax errors point at the
    /// exact column, semantic ones at the line.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::NotAssignable { location, .. } => Position::Line(location.line),
            _ => Position::Column(self.location()),
        }
    }

    /// Whether the parser can skip past this error and continue.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnexpectedEndOfInput { .. })
    }

    /// Moves an end-of-input error to `end`, the position just past the last
    /// token. The sub-parsers cannot see that position themselves.
    #[must_use]
    pub fn at_end(self, end: Location) -> Self {
        match self {
            Self::UnexpectedEndOfInput { expected, .. } => {
                Self::UnexpectedEndOfInput { expected,
                                             location: end }
            },
            other => other,
        }
    }
}
