/// The context module holds the program-wide state shared by the parser and
/// the evaluator.
///
/// A single [`context::Context`] owns the variable table and the string
/// table. Nodes refer into it by index, so it must outlive every tree built
/// against it.
pub mod context;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree recursively, computing the integer value of
/// every node, updating variable cells and talking to the console.
///
/// # Responsibilities
/// - Evaluates expressions with wrapping 32-bit arithmetic.
/// - Runs conditionals and loops.
/// - Performs `print` and `scan` against its output and input streams.
/// - Reports fatal runtime errors such as division by zero.
pub mod evaluator;
/// The factory module constructs AST nodes from raw kinds and children.
///
/// Every node the parser produces goes through this module. Leaf
/// constructors for variables and strings register their names and texts in
/// the [`context::Context`].
pub mod factory;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to a meaningful language element such as a
/// number, identifier, keyword, operator or delimiter. This is the first stage
/// of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source locations.
/// - Handles integer and string literals, identifiers and operators.
/// - Skips whitespace and comments.
/// - Reports invalid characters without stopping.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and builds
/// the tree of statements and expressions through the node factory.
///
/// # Responsibilities
/// - Implements the grammar with C operator precedence.
/// - Reports syntax errors with their location and recovers at the next
///   statement.
pub mod parser;
/// Variable cells and interned string literals.
pub mod symbols;
