use std::iter::Peekable;

use crate::{
    ast::{Kind, Node},
    error::ParseError,
    interpreter::{
        factory::make_operator,
        lexer::{Location, Token},
        parser::{
            core::{ParseResult, ParseState, parse_expression},
            utils::{eat, end_of_input, expect, peek_is, unexpected},
        },
    },
};

/// Parses statements until the end of input, or until a closing `}` when
/// `in_block` is set.
///
/// Statements are folded into left-nested blocks: one statement is returned
/// as is, two become `Block(first, second)`, a third wraps that again.
///
/// A statement that fails to parse is reported to the diagnostics and
/// skipped (see [`synchronize`]); the remaining statements are still parsed.
///
/// # Errors
/// Only non-recoverable errors are returned, which means the input ended
/// inside a statement or inside a block.
pub fn parse_statement_list<'a, I>(tokens: &mut Peekable<I>,
                                   state: &mut ParseState<'_>,
                                   in_block: bool)
                                   -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let mut sequence = None;

    loop {
        match tokens.peek().copied() {
            None if in_block => return Err(end_of_input("'}'")),
            None => return Ok(sequence),
            Some((Token::RBrace, _)) if in_block => {
                tokens.next();
                return Ok(sequence);
            },
            Some((tok @ Token::RBrace, location)) => {
                let error = unexpected(tok, *location, "a statement");
                state.diagnostics.report(&error.to_string(), error.position());
                tokens.next();
                continue;
            },
            _ => {},
        }

        match parse_statement(tokens, state) {
            Ok(Some(statement)) => {
                sequence = Some(match sequence.take() {
                                    Some(previous) => make_operator(Kind::BLOCK,
                                                                    Some(previous),
                                                                    Some(statement),
                                                                    None,
                                                                    None),
                                    None => statement,
                                });
            },
            Ok(None) => {},
            Err(e) if e.is_recoverable() => {
                state.diagnostics.report(&e.to_string(), e.position());
                synchronize(tokens);
            },
            Err(e) => return Err(e),
        }
    }
}

/// Skips the rest of a broken statement.
///
/// The token the error was found at is still pending. Tokens are discarded
/// up to and including the next `;`, or up to (not including) the next `}`
/// so that an enclosing block can still close.
fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Location)>
{
    while let Some((tok, _)) = tokens.peek().copied() {
        match tok {
            Token::Semicolon => {
                tokens.next();
                break;
            },
            Token::RBrace => break,
            _ => {
                tokens.next();
            },
        }
    }
    tracing::debug!("skipped a malformed statement");
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - an empty statement (`;`), which produces no node,
/// - a braced block,
/// - `if`, `while`, `do`-`while` and `for`,
/// - `print(...)` and `scan(...)`,
/// - an expression terminated by `;`.
///
/// # Returns
/// The statement's node, or `None` if it does nothing.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              state: &mut ParseState<'_>)
                              -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let Some((token, _)) = tokens.peek().copied() else {
        return Err(end_of_input("a statement"));
    };

    match token {
        Token::Semicolon => {
            tokens.next();
            Ok(None)
        },
        Token::LBrace => {
            tokens.next();
            parse_statement_list(tokens, state, true)
        },
        Token::If => parse_if(tokens, state).map(Some),
        Token::While => parse_while(tokens, state).map(Some),
        Token::Do => parse_do_while(tokens, state).map(Some),
        Token::For => parse_for(tokens, state).map(Some),
        Token::Print => parse_print(tokens, state).map(Some),
        Token::Scan => parse_scan(tokens, state).map(Some),
        _ => {
            let expr = parse_expression(tokens, state.context)?;
            expect(tokens, &Token::Semicolon, "';'")?;
            Ok(Some(expr))
        },
    }
}

/// Parses `"(" expression ")"`, the head of conditionals and loops.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>,
                          state: &mut ParseState<'_>)
                          -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::LParen, "'('")?;
    let condition = parse_expression(tokens, state.context)?;
    expect(tokens, &Token::RParen, "')'")?;
    Ok(condition)
}

/// Parses an `if` statement with an optional `else`.
///
/// Syntax:
/// ```text
///     if (<condition>) <statement>
///     if (<condition>) <statement> else <statement>
/// ```
/// An `else` binds to the nearest `if`. The else body is wrapped in an
/// `else` node.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   state: &mut ParseState<'_>)
                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::If, "'if'")?;
    let condition = parse_condition(tokens, state)?;
    let then_branch = parse_statement(tokens, state)?;

    let else_branch = if eat(tokens, &Token::Else) {
        let body = parse_statement(tokens, state)?;
        Some(make_operator(Kind::ELSE, body, None, None, None))
    } else {
        None
    };

    Ok(make_operator(Kind::IF, Some(condition), then_branch, else_branch, None))
}

/// Syntax: `while (<condition>) <statement>`
fn parse_while<'a, I>(tokens: &mut Peekable<I>,
                      state: &mut ParseState<'_>)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::While, "'while'")?;
    let condition = parse_condition(tokens, state)?;
    let body = parse_statement(tokens, state)?;

    Ok(make_operator(Kind::WHILE, Some(condition), body, None, None))
}

/// Syntax: `do <statement> while (<condition>);`
fn parse_do_while<'a, I>(tokens: &mut Peekable<I>,
                         state: &mut ParseState<'_>)
                         -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::Do, "'do'")?;
    let body = parse_statement(tokens, state)?;
    expect(tokens, &Token::While, "'while'")?;
    let condition = parse_condition(tokens, state)?;
    expect(tokens, &Token::Semicolon, "';'")?;

    Ok(make_operator(Kind::DO, body, Some(condition), None, None))
}

/// Parses a C `for` loop. Each of the three clauses may be empty; an empty
/// condition evaluates to `0`, so the body never runs.
///
/// Syntax: `for (<init>?; <condition>?; <step>?) <statement>`
fn parse_for<'a, I>(tokens: &mut Peekable<I>,
                    state: &mut ParseState<'_>)
                    -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::For, "'for'")?;
    expect(tokens, &Token::LParen, "'('")?;
    let init = parse_optional_expression(tokens, state, &Token::Semicolon, "';'")?;
    let condition = parse_optional_expression(tokens, state, &Token::Semicolon, "';'")?;
    let step = parse_optional_expression(tokens, state, &Token::RParen, "')'")?;
    let body = parse_statement(tokens, state)?;

    Ok(make_operator(Kind::FOR, init, condition, step, body))
}

/// Parses an expression that may be missing, followed by `terminator`.
fn parse_optional_expression<'a, I>(tokens: &mut Peekable<I>,
                                    state: &mut ParseState<'_>,
                                    terminator: &Token,
                                    description: &'static str)
                                    -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    if eat(tokens, terminator) {
        return Ok(None);
    }
    let expr = parse_expression(tokens, state.context)?;
    expect(tokens, terminator, description)?;
    Ok(Some(expr))
}

/// Parses a `print` statement.
///
/// Syntax:
/// ```text
///     print(<expression>);
///     print("<template>", <expression>);
/// ```
/// A string operand is used as a format template at run time.
fn parse_print<'a, I>(tokens: &mut Peekable<I>,
                      state: &mut ParseState<'_>)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    expect(tokens, &Token::Print, "'print'")?;
    expect(tokens, &Token::LParen, "'('")?;
    let operand = parse_expression(tokens, state.context)?;

    let argument = if eat(tokens, &Token::Comma) {
        Some(parse_expression(tokens, state.context)?)
    } else {
        None
    };

    expect(tokens, &Token::RParen, "')'")?;
    expect(tokens, &Token::Semicolon, "';'")?;

    Ok(make_operator(Kind::PRINT, Some(operand), argument, None, None))
}

/// Syntax: `scan(<variable>);`
fn parse_scan<'a, I>(tokens: &mut Peekable<I>,
                     state: &mut ParseState<'_>)
                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let location = expect(tokens, &Token::Scan, "'scan'")?;
    expect(tokens, &Token::LParen, "'('")?;

    let target = match tokens.next() {
        Some((Token::Identifier(name), _)) => state.context.make_variable(name),
        Some((tok, location)) => return Err(unexpected(tok, *location, "a variable")),
        None => return Err(end_of_input("a variable")),
    };

    if !peek_is(tokens, &Token::RParen) {
        return Err(ParseError::NotAssignable { operator: "scan",
                                               location });
    }
    tokens.next();
    expect(tokens, &Token::Semicolon, "';'")?;

    Ok(make_operator(Kind::SCAN, Some(target), None, None, None))
}
