use std::iter::Peekable;

use crate::{
    ast::Node,
    error::{Diagnostics, ParseError},
    interpreter::{
        context::Context,
        lexer::{Location, Token, tokenize},
        parser::{expression::parse_assignment, statement::parse_statement_list},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Where the parser puts what it builds and what it finds wrong.
pub struct ParseState<'c> {
    /// Receives variables and string literals through the node factory.
    pub context:     &'c mut Context,
    /// Receives recoverable errors.
    pub diagnostics: &'c mut Diagnostics,
}

/// Parses a whole program into its root node.
///
/// This is the entry point of the front end. The source is tokenized, then
/// parsed as a sequence of statements folded into nested blocks. Every node
/// is built through the node factory, so `context` ends up holding every
/// variable and string literal of the program.
///
/// Errors inside a statement are reported to `diagnostics` and the
/// statement is skipped; parsing only fails outright when the input ends in
/// the middle of a construct.
///
/// # Returns
/// The root node, or `None` for a program without statements.
///
/// # Errors
/// [`ParseError::UnexpectedEndOfInput`] if the source ends inside an
/// unfinished statement.
///
/// # Example
/// ```
/// use mikroc::{
///     error::Diagnostics,
///     interpreter::{context::Context, parser::core::parse_program},
/// };
///
/// let mut context = Context::new();
/// let mut diagnostics = Diagnostics::new();
///
/// let root = parse_program("x = 1; y = x + 2;", &mut context, &mut diagnostics).unwrap();
/// assert!(root.is_some());
/// assert_eq!(context.variables.len(), 2);
///
/// assert!(parse_program("while (x", &mut context, &mut diagnostics).is_err());
/// ```
pub fn parse_program(source: &str,
                     context: &mut Context,
                     diagnostics: &mut Diagnostics)
                     -> ParseResult<Option<Node>> {
    let lexed = tokenize(source, diagnostics);
    tracing::debug!(tokens = lexed.tokens.len(), "tokenized program");

    let mut state = ParseState { context, diagnostics };
    let mut tokens = lexed.tokens.iter().peekable();

    parse_statement_list(&mut tokens, &mut state, false).map_err(|e| e.at_end(lexed.end))
}

/// Parses a full expression.
///
/// Assignment has the lowest precedence, so parsing starts there and
/// descends through the C precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               context: &mut Context)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_assignment(tokens, context)
}
