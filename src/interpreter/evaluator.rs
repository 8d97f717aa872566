/// Core evaluation logic.
///
/// Contains the evaluator itself, its entry points and the dispatch over
/// node variants.
pub mod core;

/// Unary operator evaluation.
///
/// Implements identity, negation, bitwise complement and logical NOT.
pub mod unary;

/// Binary operator evaluation.
///
/// Implements arithmetic, bitwise, comparison and logical operators on
/// 32-bit integers, including the division-by-zero check of `/` and `%`.
pub mod binary;

/// Assignment evaluation.
///
/// Handles plain and compound assignment, increment and decrement, and the
/// resolution of the storage a node designates.
pub mod assign;

/// Control flow evaluation.
///
/// Executes conditionals and the `while`, `do`-`while` and `for` loops.
pub mod control;

/// Console statements.
///
/// Executes `print` and `scan` against the evaluator's output and input.
pub mod console;

/// printf-style rendering of string templates.
pub mod format;
