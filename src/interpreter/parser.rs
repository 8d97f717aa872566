/// Parser entry points.
///
/// Holds the program-level entry point, the parse state threaded through
/// every parsing function and the shared result type.
pub mod core;

/// Expression parsing.
///
/// Implements the C precedence hierarchy, from assignment down to literals
/// and parenthesised expressions.
pub mod expression;

/// Statement parsing.
///
/// Parses statement lists, blocks, conditionals, loops, `print` and `scan`,
/// and recovers from malformed statements.
pub mod statement;

/// Token-level helpers shared by the parsing functions.
mod utils;
