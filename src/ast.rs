use std::{cell::Cell, fmt};

use crate::interpreter::symbols::{StrId, VarId};

/// An optional child of an interior node.
///
/// Absent children are legal everywhere: they evaluate to `0`, which is how
/// a missing `else` branch or an empty `for` clause behaves.
pub type Child = Option<Box<Node>>;

/// The raw discriminant of a node, as handed to the node factory.
///
/// Single-character operators are identified by their ASCII code, statement
/// sequencing by `0`, and every other construct by a code at or above `258`
/// (the first code a grammar generator hands out to named tokens). The
/// factory turns a `Kind` into a typed [`Node`] variant; a code it does not
/// know becomes [`Node::Unknown`].
///
/// ## Example
/// ```
/// use mikroc::ast::Kind;
///
/// assert_eq!(Kind::ADD, Kind::from('+'));
/// assert_eq!(Kind::ADD.to_string(), "'+'");
/// assert_eq!(Kind::WHILE.to_string(), "284");
/// assert_eq!(Kind(7).to_string(), "7");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Kind(pub i32);

impl Kind {
    /// Statement sequencing.
    pub const BLOCK: Self = Self(0);

    /// `+`, binary or unary.
    pub const ADD: Self = Self::ascii(b'+');
    /// `-`, binary or unary.
    pub const SUB: Self = Self::ascii(b'-');
    /// `*`
    pub const MUL: Self = Self::ascii(b'*');
    /// `/`
    pub const DIV: Self = Self::ascii(b'/');
    /// `%`
    pub const MOD: Self = Self::ascii(b'%');
    /// `&`
    pub const BIT_AND: Self = Self::ascii(b'&');
    /// `^`
    pub const BIT_XOR: Self = Self::ascii(b'^');
    /// `|`
    pub const BIT_OR: Self = Self::ascii(b'|');
    /// `<`
    pub const LESS: Self = Self::ascii(b'<');
    /// `>`
    pub const GREATER: Self = Self::ascii(b'>');
    /// `~`
    pub const BIT_NOT: Self = Self::ascii(b'~');
    /// `!`
    pub const NOT: Self = Self::ascii(b'!');
    /// `=`
    pub const ASSIGN: Self = Self::ascii(b'=');

    /// Integer literal leaf.
    pub const INTEGER: Self = Self(258);
    /// String literal leaf.
    pub const STRING: Self = Self(259);
    /// Variable leaf.
    pub const VARIABLE: Self = Self(260);
    /// `++`, prefix when the first slot is filled, postfix otherwise.
    pub const INCREMENT: Self = Self(261);
    /// `--`, prefix when the first slot is filled, postfix otherwise.
    pub const DECREMENT: Self = Self(262);
    /// `<<`
    pub const SHIFT_LEFT: Self = Self(263);
    /// `>>`
    pub const SHIFT_RIGHT: Self = Self(264);
    /// `==`
    pub const EQUAL: Self = Self(265);
    /// `!=`
    pub const NOT_EQUAL: Self = Self(266);
    /// `<=`
    pub const LESS_EQUAL: Self = Self(267);
    /// `>=`
    pub const GREATER_EQUAL: Self = Self(268);
    /// `&&` or `and`
    pub const AND: Self = Self(269);
    /// `||` or `or`
    pub const OR: Self = Self(270);
    /// The `not` keyword.
    pub const NOT_WORD: Self = Self(271);
    /// `*=`
    pub const MUL_ASSIGN: Self = Self(272);
    /// `/=`
    pub const DIV_ASSIGN: Self = Self(273);
    /// `%=`
    pub const MOD_ASSIGN: Self = Self(274);
    /// `+=`
    pub const ADD_ASSIGN: Self = Self(275);
    /// `-=`
    pub const SUB_ASSIGN: Self = Self(276);
    /// `<<=`
    pub const SHIFT_LEFT_ASSIGN: Self = Self(277);
    /// `>>=`
    pub const SHIFT_RIGHT_ASSIGN: Self = Self(278);
    /// `&=`
    pub const BIT_AND_ASSIGN: Self = Self(279);
    /// `^=`
    pub const BIT_XOR_ASSIGN: Self = Self(280);
    /// `|=`
    pub const BIT_OR_ASSIGN: Self = Self(281);
    /// `if (condition) then else`
    pub const IF: Self = Self(282);
    /// Wrapper around an else branch.
    pub const ELSE: Self = Self(283);
    /// `while (condition) body`
    pub const WHILE: Self = Self(284);
    /// `do body while (condition)`
    pub const DO: Self = Self(285);
    /// `for (init; condition; step) body`
    pub const FOR: Self = Self(286);
    /// `print(...)`
    pub const PRINT: Self = Self(287);
    /// `scan(...)`
    pub const SCAN: Self = Self(288);

    const fn ascii(byte: u8) -> Self {
        Self(byte as i32)
    }
}

impl From<char> for Kind {
    fn from(c: char) -> Self {
        Self(c as i32)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.0) {
            Ok(byte) if byte.is_ascii_graphic() => write!(f, "'{}'", char::from(byte)),
            _ => write!(f, "{}", self.0),
        }
    }
}

/// A node of the abstract syntax tree.
///
/// Every construct of the language has its own variant carrying only the
/// children it uses. Leaves hold their payload directly: an integer literal
/// its value, a string literal a handle into the interned string table, a
/// variable a handle into the variable table.
///
/// Integer literals keep their value in a [`Cell`] because `++` and `--`
/// applied to a literal update the literal itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An integer literal.
    Integer(Cell<i32>),
    /// A string literal.
    Str(StrId),
    /// A reference to a variable's storage cell.
    Variable(VarId),
    /// Two statements executed in order.
    Block {
        /// Executed first.
        first:  Child,
        /// Executed second.
        second: Child,
    },
    /// A prefix operator applied to one operand.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Child,
    },
    /// An operator applied to two operands.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand, evaluated first.
        left:  Child,
        /// Right operand.
        right: Child,
    },
    /// `target = value`
    Assign {
        /// The variable being written.
        target: Child,
        /// The assigned expression.
        value:  Child,
    },
    /// `target op= value`
    CompoundAssign {
        /// The operator combining the old value with `value`.
        op:     BinaryOperator,
        /// The variable being updated.
        target: Child,
        /// The right-hand side.
        value:  Child,
    },
    /// `++target` or `target++`
    Increment {
        /// Whether the old or the new value is yielded.
        fixity: Fixity,
        /// The variable or integer literal being updated.
        target: Child,
    },
    /// `--target` or `target--`
    Decrement {
        /// Whether the old or the new value is yielded.
        fixity: Fixity,
        /// The variable or integer literal being updated.
        target: Child,
    },
    /// Conditional statement.
    If {
        /// The condition.
        condition:   Child,
        /// Executed when the condition is nonzero.
        then_branch: Child,
        /// Executed otherwise; usually an [`Node::Else`].
        else_branch: Child,
    },
    /// The body of an `else`, forwarded to unchanged.
    Else {
        /// The else body.
        body: Child,
    },
    /// Pre-test loop.
    While {
        /// Loop condition.
        condition: Child,
        /// Loop body.
        body:      Child,
    },
    /// Post-test loop; the body runs at least once.
    DoWhile {
        /// Loop body.
        body:      Child,
        /// Loop condition.
        condition: Child,
    },
    /// C-style counting loop.
    For {
        /// Evaluated once before the loop.
        init:      Child,
        /// Tested before every iteration.
        condition: Child,
        /// Evaluated after every body.
        step:      Child,
        /// Loop body.
        body:      Child,
    },
    /// `print(operand)` or `print("template", argument)`.
    Print {
        /// An expression, or a string literal used as a format template.
        operand:  Child,
        /// The value substituted into the template, if any.
        argument: Child,
    },
    /// `scan(target)`
    Scan {
        /// The variable receiving the integer read.
        target: Child,
    },
    /// A node built from a discriminant the factory does not know.
    Unknown(Kind),
}

impl Node {
    /// Returns the discriminant this node was built from.
    ///
    /// ## Example
    /// ```
    /// use mikroc::{ast::Kind, interpreter::factory::{make_integer, make_operator}};
    ///
    /// let node = make_operator(Kind::SUB, Some(make_integer(1)), None, None, None);
    /// assert_eq!(node.kind(), Kind::SUB);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Integer(_) => Kind::INTEGER,
            Self::Str(_) => Kind::STRING,
            Self::Variable(_) => Kind::VARIABLE,
            Self::Block { .. } => Kind::BLOCK,
            Self::Unary { op, .. } => op.kind(),
            Self::Binary { op, .. } => op.kind(),
            Self::Assign { .. } => Kind::ASSIGN,
            Self::CompoundAssign { op, .. } => op.compound_kind(),
            Self::Increment { .. } => Kind::INCREMENT,
            Self::Decrement { .. } => Kind::DECREMENT,
            Self::If { .. } => Kind::IF,
            Self::Else { .. } => Kind::ELSE,
            Self::While { .. } => Kind::WHILE,
            Self::DoWhile { .. } => Kind::DO,
            Self::For { .. } => Kind::FOR,
            Self::Print { .. } => Kind::PRINT,
            Self::Scan { .. } => Kind::SCAN,
            Self::Unknown(kind) => *kind,
        }
    }

    /// Moves every present child into `out`, leaving the slots empty.
    fn take_children(&mut self, out: &mut Vec<Box<Self>>) {
        match self {
            Self::Integer(_) | Self::Str(_) | Self::Variable(_) | Self::Unknown(_) => {},
            Self::Unary { operand: only, .. }
            | Self::Increment { target: only, .. }
            | Self::Decrement { target: only, .. }
            | Self::Else { body: only }
            | Self::Scan { target: only } => out.extend(only.take()),
            Self::Block { first, second }
            | Self::Binary { left: first,
                             right: second,
                             .. }
            | Self::Assign { target: first,
                             value: second, }
            | Self::CompoundAssign { target: first,
                                     value: second,
                                     .. }
            | Self::While { condition: first,
                            body: second, }
            | Self::DoWhile { body: first,
                              condition: second, }
            | Self::Print { operand: first,
                            argument: second, } => {
                out.extend(first.take());
                out.extend(second.take());
            },
            Self::If { condition,
                       then_branch,
                       else_branch, } => {
                out.extend(condition.take());
                out.extend(then_branch.take());
                out.extend(else_branch.take());
            },
            Self::For { init,
                        condition,
                        step,
                        body, } => {
                out.extend(init.take());
                out.extend(condition.take());
                out.extend(step.take());
                out.extend(body.take());
            },
        }
    }
}

// Statement chains are as deep as the program is long; children are
// released from an explicit stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

/// Whether an increment or decrement yields the updated or the old value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fixity {
    /// `++x`: update, then yield the new value.
    Prefix,
    /// `x++`: yield the old value, then update.
    Postfix,
}

/// Represents a binary operator.
///
/// The same operators back compound assignment (`+=` uses [`Self::Add`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Arithmetic right shift (`>>`)
    ShiftRight,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Bitwise or (`|`)
    BitOr,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`, `and`); both sides are always evaluated.
    And,
    /// Logical or (`||`, `or`); both sides are always evaluated.
    Or,
}

impl BinaryOperator {
    /// The discriminant of the plain binary form.
    #[must_use]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Add => Kind::ADD,
            Self::Sub => Kind::SUB,
            Self::Mul => Kind::MUL,
            Self::Div => Kind::DIV,
            Self::Mod => Kind::MOD,
            Self::ShiftLeft => Kind::SHIFT_LEFT,
            Self::ShiftRight => Kind::SHIFT_RIGHT,
            Self::BitAnd => Kind::BIT_AND,
            Self::BitXor => Kind::BIT_XOR,
            Self::BitOr => Kind::BIT_OR,
            Self::Equal => Kind::EQUAL,
            Self::NotEqual => Kind::NOT_EQUAL,
            Self::Less => Kind::LESS,
            Self::Greater => Kind::GREATER,
            Self::LessEqual => Kind::LESS_EQUAL,
            Self::GreaterEqual => Kind::GREATER_EQUAL,
            Self::And => Kind::AND,
            Self::Or => Kind::OR,
        }
    }

    /// The discriminant of the compound-assignment form. Operators without
    /// one (comparisons and logical operators) map to their plain kind.
    #[must_use]
    pub const fn compound_kind(self) -> Kind {
        match self {
            Self::Mul => Kind::MUL_ASSIGN,
            Self::Div => Kind::DIV_ASSIGN,
            Self::Mod => Kind::MOD_ASSIGN,
            Self::Add => Kind::ADD_ASSIGN,
            Self::Sub => Kind::SUB_ASSIGN,
            Self::ShiftLeft => Kind::SHIFT_LEFT_ASSIGN,
            Self::ShiftRight => Kind::SHIFT_RIGHT_ASSIGN,
            Self::BitAnd => Kind::BIT_AND_ASSIGN,
            Self::BitXor => Kind::BIT_XOR_ASSIGN,
            Self::BitOr => Kind::BIT_OR_ASSIGN,
            other => other.kind(),
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Bitwise complement (`~x`).
    BitNot,
    /// Logical NOT (`!x`).
    Not,
    /// Logical NOT spelled `not x`.
    NotWord,
}

impl UnaryOperator {
    /// The discriminant this operator is built from.
    #[must_use]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Plus => Kind::ADD,
            Self::Negate => Kind::SUB,
            Self::BitNot => Kind::BIT_NOT,
            Self::Not => Kind::NOT,
            Self::NotWord => Kind::NOT_WORD,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual,
            Mod, Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            BitAnd => "&",
            BitXor => "^",
            BitOr => "|",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}
