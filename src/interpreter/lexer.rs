use std::fmt;

use logos::Logos;

use crate::error::{Diagnostics, ParseError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Decimal integer literals such as `42`. Literals that do not fit into
    /// an `int` are rejected.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i32),
    /// String literals such as `"x = %d\n"`, with escapes already resolved.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    Str(String),
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`
    #[token("for")]
    For,
    /// `print`
    #[token("print")]
    Print,
    /// `scan`
    #[token("scan")]
    Scan,
    /// `and`, an alias of `&&`
    #[token("and")]
    And,
    /// `or`, an alias of `||`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable names such as `x` or `total`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment = lex.slice();
        if let Some(last) = comment.rfind('\n') {
            lex.extras.line += comment.matches('\n').count();
            lex.extras.line_start = lex.span().start + last + 1;
        }
        logos::Skip
    })]
    MultiLineComment,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `<<=`
    #[token("<<=")]
    ShiftLeftAssign,
    /// `>>=`
    #[token(">>=")]
    ShiftRightAssign,
    /// `&=`
    #[token("&=")]
    AmpersandAssign,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `|=`
    #[token("|=")]
    PipeAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `^`
    #[token("^")]
    Caret,
    /// `|`
    #[token("|")]
    Pipe,
    /// `~`
    #[token("~")]
    Tilde,
    /// `!`
    #[token("!")]
    Bang,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,

    /// Line breaks; they only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "integer {value}"),
            Self::Str(text) => write!(f, "string {text:?}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            other => write!(f, "'{}'", other.symbol()),
        }
    }
}

impl Token {
    /// The source spelling of keywords and punctuation.
    const fn symbol(&self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::For => "for",
            Self::Print => "print",
            Self::Scan => "scan",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::ShiftLeftAssign => "<<=",
            Self::ShiftRightAssign => ">>=",
            Self::AmpersandAssign => "&=",
            Self::CaretAssign => "^=",
            Self::PipeAssign => "|=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::DoubleAmpersand => "&&",
            Self::DoublePipe => "||",
            Self::Ampersand => "&",
            Self::Caret => "^",
            Self::Pipe => "|",
            Self::Tilde => "~",
            Self::Bang => "!",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equals => "=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Integer(_)
            | Self::Str(_)
            | Self::Identifier(_)
            | Self::Comment
            | Self::MultiLineComment
            | Self::NewLine
            | Self::Ignored => "",
        }
    }
}

/// A 1-based position in the source text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column in characters, starting at 1.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset at which it starts, so that
/// every token can be given a line and a column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// The output of [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    /// Every token with the location it starts at.
    pub tokens: Vec<(Token, Location)>,
    /// The location just past the last character of the source.
    pub end:    Location,
}

/// Splits `source` into located tokens.
///
/// Text that forms no token is reported to `diagnostics` as an
/// [`ParseError::InvalidToken`] and skipped, so tokenization itself never
/// fails.
///
/// ## Example
/// ```
/// use mikroc::{
///     error::Diagnostics,
///     interpreter::lexer::{Location, Token, tokenize},
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let lexed = tokenize("x += 1;\ny", &mut diagnostics);
///
/// assert_eq!(lexed.tokens[1], (Token::PlusAssign, Location { line: 1, column: 3 }));
/// assert_eq!(lexed.tokens[4].1, Location { line: 2, column: 1 });
/// assert!(!diagnostics.had_errors());
/// ```
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Lexed {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let location = Location { line:   lexer.extras.line,
                                  column: column_of(source,
                                                    lexer.extras.line_start,
                                                    span.start), };
        match token {
            Ok(tok) => tokens.push((tok, location)),
            Err(()) => {
                let error = ParseError::InvalidToken { text: lexer.slice().to_string(),
                                                       location };
                diagnostics.report(&error.to_string(), error.position());
            },
        }
    }

    let end = Location { line:   lexer.extras.line,
                         column: column_of(source, lexer.extras.line_start, source.len()), };
    Lexed { tokens, end }
}

/// Character-based column of byte offset `at` on a line starting at
/// `line_start`.
fn column_of(source: &str,
             line_start: usize,
             at: usize)
             -> usize {
    source.get(line_start..at).map_or(1, |prefix| prefix.chars().count() + 1)
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i32)`: The parsed value if it fits into an `int`.
/// - `None`: If the literal is too large.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i32> {
    lex.slice().parse().ok()
}

/// Strips the quotes of a string literal and resolves its escapes.
///
/// Unknown escapes keep the escaped character.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];

    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some('0') => text.push('\0'),
            Some('a') => text.push('\u{7}'),
            Some(other) => text.push(other),
            None => text.push('\\'),
        }
    }
    text
}
