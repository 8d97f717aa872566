use std::iter::Peekable;

use crate::{
    ast::{Kind, Node},
    error::ParseError,
    interpreter::{
        context::Context,
        factory::{make_integer, make_operator},
        lexer::{Location, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, unexpected},
        },
    },
};

type Level<I> = fn(&mut Peekable<I>, &mut Context) -> ParseResult<Node>;

/// Parses an assignment or anything of higher precedence.
///
/// Assignment is right-associative: `a = b += 2` assigns `b += 2` to `a`.
/// The left-hand side must be a plain variable.
///
/// Grammar: `assignment := logical_or (assign_op assignment)?`
///
/// # Errors
/// [`ParseError::NotAssignable`] if the left-hand side of an assignment
/// operator is not a variable, plus anything the operands raise.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                               context: &mut Context)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let target = parse_logical_or(tokens, context)?;

    let Some((kind, operator, location)) =
        tokens.peek().and_then(|(tok, location)| {
                         assignment_kind(tok).map(|(kind, op)| (kind, op, *location))
                     })
    else {
        return Ok(target);
    };
    tokens.next();

    if !matches!(target, Node::Variable(_)) {
        return Err(ParseError::NotAssignable { operator, location });
    }

    let value = parse_assignment(tokens, context)?;
    Ok(make_operator(kind, Some(target), Some(value), None, None))
}

/// Maps an assignment token to its node kind and spelling.
const fn assignment_kind(token: &Token) -> Option<(Kind, &'static str)> {
    let pair = match token {
        Token::Equals => (Kind::ASSIGN, "="),
        Token::StarAssign => (Kind::MUL_ASSIGN, "*="),
        Token::SlashAssign => (Kind::DIV_ASSIGN, "/="),
        Token::PercentAssign => (Kind::MOD_ASSIGN, "%="),
        Token::PlusAssign => (Kind::ADD_ASSIGN, "+="),
        Token::MinusAssign => (Kind::SUB_ASSIGN, "-="),
        Token::ShiftLeftAssign => (Kind::SHIFT_LEFT_ASSIGN, "<<="),
        Token::ShiftRightAssign => (Kind::SHIFT_RIGHT_ASSIGN, ">>="),
        Token::AmpersandAssign => (Kind::BIT_AND_ASSIGN, "&="),
        Token::CaretAssign => (Kind::BIT_XOR_ASSIGN, "^="),
        Token::PipeAssign => (Kind::BIT_OR_ASSIGN, "|="),
        _ => return None,
    };
    Some(pair)
}

/// Parses a chain of left-associative binary operators of one precedence
/// level.
///
/// `operators` maps the tokens of this level to node kinds; `next` parses
/// the level of next-higher precedence.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           context: &mut Context,
                           operators: &[(Token, Kind)],
                           next: Level<I>)
                           -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let mut left = next(tokens, context)?;

    while let Some(kind) = tokens.peek().and_then(|(tok, _)| {
                                           operators.iter()
                                                    .find(|(candidate, _)| candidate == tok)
                                                    .map(|(_, kind)| *kind)
                                       })
    {
        tokens.next();
        let right = next(tokens, context)?;
        left = make_operator(kind, Some(left), Some(right), None, None);
    }

    Ok(left)
}

/// Grammar: `logical_or := logical_and (("||" | "or") logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>,
                               context: &mut Context)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::DoublePipe, Kind::OR), (Token::Or, Kind::OR)],
                     parse_logical_and)
}

/// Grammar: `logical_and := bit_or (("&&" | "and") bit_or)*`
fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>,
                            context: &mut Context)
                            -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::DoubleAmpersand, Kind::AND), (Token::And, Kind::AND)],
                     parse_bit_or)
}

fn parse_bit_or<'a, I>(tokens: &mut Peekable<I>,
                       context: &mut Context)
                       -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens, context, &[(Token::Pipe, Kind::BIT_OR)], parse_bit_xor)
}

fn parse_bit_xor<'a, I>(tokens: &mut Peekable<I>,
                        context: &mut Context)
                        -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens, context, &[(Token::Caret, Kind::BIT_XOR)], parse_bit_and)
}

fn parse_bit_and<'a, I>(tokens: &mut Peekable<I>,
                        context: &mut Context)
                        -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens, context, &[(Token::Ampersand, Kind::BIT_AND)], parse_equality)
}

fn parse_equality<'a, I>(tokens: &mut Peekable<I>,
                         context: &mut Context)
                         -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::EqualEqual, Kind::EQUAL), (Token::BangEqual, Kind::NOT_EQUAL)],
                     parse_relational)
}

fn parse_relational<'a, I>(tokens: &mut Peekable<I>,
                           context: &mut Context)
                           -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::Less, Kind::LESS),
                       (Token::Greater, Kind::GREATER),
                       (Token::LessEqual, Kind::LESS_EQUAL),
                       (Token::GreaterEqual, Kind::GREATER_EQUAL)],
                     parse_shift)
}

fn parse_shift<'a, I>(tokens: &mut Peekable<I>,
                      context: &mut Context)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::ShiftLeft, Kind::SHIFT_LEFT), (Token::ShiftRight, Kind::SHIFT_RIGHT)],
                     parse_additive)
}

fn parse_additive<'a, I>(tokens: &mut Peekable<I>,
                         context: &mut Context)
                         -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::Plus, Kind::ADD), (Token::Minus, Kind::SUB)],
                     parse_multiplicative)
}

fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                               context: &mut Context)
                               -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    parse_left_assoc(tokens,
                     context,
                     &[(Token::Star, Kind::MUL),
                       (Token::Slash, Kind::DIV),
                       (Token::Percent, Kind::MOD)],
                     parse_unary)
}

/// Parses prefix operators.
///
/// `++` and `--` need a variable or an integer literal to update; the other
/// operators accept any operand.
///
/// Grammar: `unary := ("-" | "+" | "!" | "not" | "~" | "++" | "--") unary | postfix`
fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                      context: &mut Context)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let Some((token, location)) = tokens.peek().copied() else {
        return Err(end_of_input("an expression"));
    };

    let kind = match token {
        Token::Minus => Kind::SUB,
        Token::Plus => Kind::ADD,
        Token::Bang => Kind::NOT,
        Token::Not => Kind::NOT_WORD,
        Token::Tilde => Kind::BIT_NOT,
        Token::PlusPlus => Kind::INCREMENT,
        Token::MinusMinus => Kind::DECREMENT,
        _ => return parse_postfix(tokens, context),
    };
    tokens.next();

    let operand = parse_unary(tokens, context)?;
    if matches!(kind, Kind::INCREMENT | Kind::DECREMENT) {
        check_step_target(&operand, kind, *location)?;
    }

    Ok(make_operator(kind, Some(operand), None, None, None))
}

/// Parses a primary expression followed by an optional `++` or `--`.
///
/// Grammar: `postfix := primary ("++" | "--")?`
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>,
                        context: &mut Context)
                        -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let operand = parse_primary(tokens, context)?;

    let kind = match tokens.peek() {
        Some((Token::PlusPlus, _)) => Kind::INCREMENT,
        Some((Token::MinusMinus, _)) => Kind::DECREMENT,
        _ => return Ok(operand),
    };
    let Some((_, location)) = tokens.next() else {
        return Ok(operand);
    };
    check_step_target(&operand, kind, *location)?;

    Ok(make_operator(kind, None, Some(operand), None, None))
}

fn check_step_target(operand: &Node,
                     kind: Kind,
                     location: Location)
                     -> ParseResult<()> {
    if matches!(operand, Node::Variable(_) | Node::Integer(_)) {
        return Ok(());
    }
    let operator = if kind == Kind::INCREMENT { "++" } else { "--" };
    Err(ParseError::NotAssignable { operator, location })
}

/// Parses literals, variables and parenthesised expressions.
///
/// Grammar: `primary := INTEGER | STRING | IDENTIFIER | "(" expression ")"`
fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                        context: &mut Context)
                        -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Location)> + Clone
{
    let Some((token, location)) = tokens.peek().copied() else {
        return Err(end_of_input("an expression"));
    };

    let node = match token {
        Token::Integer(value) => make_integer(*value),
        Token::Str(text) => context.make_string(text),
        Token::Identifier(name) => context.make_variable(name),
        Token::LParen => {
            tokens.next();
            let inner = parse_expression(tokens, context)?;
            expect(tokens, &Token::RParen, "')'")?;
            return Ok(inner);
        },
        tok => return Err(unexpected(tok, *location, "an expression")),
    };
    tokens.next();
    Ok(node)
}
