use thiserror::Error;

use crate::ast::{BinaryOperator, Kind};

/// Represents all errors that can occur during evaluation.
///
/// Every variant is fatal: the evaluator stops at the first one and hands it
/// to its caller, which is expected to terminate the program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The right operand of a plain `/` or `%` evaluated to zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// A compound `/=` or `%=` divided by zero. Compound assignment performs
    /// no zero check, so this is the trap of the raw operation rather than a
    /// reported division by zero.
    #[error("Arithmetic fault in '{op}='")]
    ArithmeticFault {
        /// The operator that trapped.
        op: BinaryOperator,
    },
    /// A node was built from a discriminant the evaluator does not know.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(Kind),
    /// An assignment, `++`, `--` or `scan` targeted something that is neither
    /// a variable nor an integer literal.
    #[error("Cannot store into a node of kind {0}")]
    NotAssignable(Kind),
    /// An assignment, `++`, `--` or `scan` has no target at all.
    #[error("Missing assignment target")]
    MissingTarget,
    /// Writing program output or reading program input failed.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
