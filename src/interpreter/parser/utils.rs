use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::{Location, Token}, parser::core::ParseResult},
};

/// Consumes the next token, which must equal `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected token.
/// - `expected`: The token required next.
/// - `description`: How the token is named in an error message.
///
/// # Returns
/// The location of the consumed token.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a different token comes next (it is left in place),
/// - the input ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &'static str)
                                                    -> ParseResult<Location>
    where I: Iterator<Item = &'a (Token, Location)>
{
    match tokens.peek().copied() {
        Some((tok, location)) if tok == expected => {
            tokens.next();
            Ok(*location)
        },
        Some((tok, location)) => Err(unexpected(tok, *location, description)),
        None => Err(end_of_input(description)),
    }
}

/// Consumes the next token if it equals `token`.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>,
                                                 token: &Token)
                                                 -> bool
    where I: Iterator<Item = &'a (Token, Location)>
{
    if tokens.peek().is_some_and(|(tok, _)| tok == token) {
        tokens.next();
        return true;
    }
    false
}

/// Whether the next token equals `token`.
pub(in crate::interpreter::parser) fn peek_is<'a, I>(tokens: &mut Peekable<I>,
                                                     token: &Token)
                                                     -> bool
    where I: Iterator<Item = &'a (Token, Location)>
{
    tokens.peek().is_some_and(|(tok, _)| tok == token)
}

pub(in crate::interpreter::parser) fn unexpected(token: &Token,
                                                 location: Location,
                                                 expected: &'static str)
                                                 -> ParseError {
    ParseError::UnexpectedToken { token: token.to_string(),
                                  expected,
                                  location }
}

/// An end-of-input error; its location is filled in by `parse_program`.
pub(in crate::interpreter::parser) fn end_of_input(expected: &'static str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected,
                                       location: Location::default() }
}
