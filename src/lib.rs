//! # mikroc
//!
//! mikroc is an interpreter for a small C-like language written in Rust.
//! Programs work on 32-bit integers stored in global variables and use C
//! operators, `if`/`else`, `while`, `do`-`while`, `for`, a printf-style
//! `print` and an integer `scan`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::{
    error::{Diagnostics, Error},
    interpreter::{context::Context, evaluator::core::Evaluator, parser::core::parse_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the raw `Kind` discriminants
/// that represent programs as trees. The tree is built by the parser through
/// the node factory and walked by the evaluator.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Defines the operator enums shared by the parser and the evaluator.
/// - Keeps the numeric kind of every construct for diagnostics.
pub mod ast;
/// Provides error types for parsing and evaluation.
///
/// This module defines every error that can be raised while lexing, parsing
/// or evaluating a program, and the diagnostics channel through which
/// recoverable errors are reported.
///
/// # Responsibilities
/// - Defines error enums for syntax errors and fatal runtime errors.
/// - Formats reported messages with their line and column.
/// - Terminates the process on fatal runtime errors.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, the symbol tables and
/// evaluation to provide a complete runtime for mikroc programs.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, factory and evaluator.
/// - Provides entry points for parsing and evaluating programs.
pub mod interpreter;

/// Parses and runs a program.
///
/// Syntax errors the parser can recover from do not stop the run; they are
/// returned in the [`Diagnostics`] once the program has finished. `scan`
/// reads from `input` and `print` writes to `output`.
///
/// # Errors
/// [`Error::Parse`] if the source ends inside an unfinished construct, in
/// which case nothing is evaluated. [`Error::Runtime`] for the fatal error
/// that stopped the program; output written before it has been flushed.
///
/// # Examples
/// ```
/// use mikroc::run;
///
/// let mut output = Vec::new();
/// let diagnostics = run("x = 6; print(\"%d\\n\", x * 7);", std::io::empty(), &mut output).unwrap();
/// assert!(!diagnostics.had_errors());
/// assert_eq!(output, b"42\n");
///
/// // Plain division by zero stops the program.
/// let mut output = Vec::new();
/// assert!(run("print(1); print(1 / 0);", std::io::empty(), &mut output).is_err());
/// assert_eq!(output, b"1");
/// ```
pub fn run(source: &str, input: impl BufRead, output: impl Write) -> Result<Diagnostics, Error> {
    let mut context = Context::new();
    let mut diagnostics = Diagnostics::new();

    let root = parse_program(source, &mut context, &mut diagnostics)?;

    let mut evaluator = Evaluator::new(&mut context, input, output);
    evaluator.run(root.as_ref())?;

    Ok(diagnostics)
}
