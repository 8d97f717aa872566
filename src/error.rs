/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Most of them are recoverable: the parser reports them through
/// [`Diagnostics`] and keeps going.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors that stop evaluation: division by zero, arithmetic
/// faults, unknown nodes and I/O failures. None of them is recovered from.
pub mod runtime_error;
/// Error reporting and the fatal abort path.
///
/// Collects positioned messages for recoverable errors and terminates the
/// process for unrecoverable ones.
pub mod diagnostics;

pub use diagnostics::{Diagnostics, Position, abort_fatal};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error the library driver can return.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parsing failed outright.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation hit a fatal condition.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
