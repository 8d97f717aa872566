use std::cell::Cell;

use crate::{
    ast::{BinaryOperator, Child, Fixity, Kind, Node, UnaryOperator},
    interpreter::context::Context,
};

/// Builds an interior node from a discriminant and up to four children.
///
/// Children are placed by slot: block `(first, second)`, binary
/// `(left, right)`, unary `(operand)`, assignments `(target, value)`,
/// `if (condition, then, else)`, `else (body)`, `while (condition, body)`,
/// `do (body, condition)`, `for (init, condition, step, body)`,
/// `print (operand, argument)` and `scan (target)`. Unused slots are
/// dropped.
///
/// The number of children is not validated. Two kinds are resolved by which
/// slots are filled: `+` and `-` without a second child are unary, and `++`
/// and `--` are prefix when the first slot is filled and postfix on the
/// second slot otherwise. A kind the factory does not know, including the
/// leaf kinds that need a payload, yields [`Node::Unknown`].
///
/// ## Example
/// ```
/// use mikroc::{
///     ast::{Kind, Node, UnaryOperator},
///     interpreter::factory::{make_integer, make_operator},
/// };
///
/// let negated = make_operator(Kind::SUB, Some(make_integer(4)), None, None, None);
/// assert!(matches!(negated, Node::Unary { op: UnaryOperator::Negate, .. }));
///
/// let unknown = make_operator(Kind::from('@'), None, None, None, None);
/// assert_eq!(unknown, Node::Unknown(Kind::from('@')));
/// ```
#[must_use]
pub fn make_operator(kind: Kind,
                     first: Option<Node>,
                     second: Option<Node>,
                     third: Option<Node>,
                     fourth: Option<Node>)
                     -> Node {
    let first: Child = first.map(Box::new);
    let second: Child = second.map(Box::new);
    let third: Child = third.map(Box::new);
    let fourth: Child = fourth.map(Box::new);

    if let Some(op) = unary_operator(kind, second.is_some()) {
        return Node::Unary { op,
                             operand: first };
    }
    if let Some(op) = binary_operator(kind) {
        return Node::Binary { op,
                              left: first,
                              right: second };
    }
    if let Some(op) = compound_operator(kind) {
        return Node::CompoundAssign { op,
                                      target: first,
                                      value: second };
    }

    match kind {
        Kind::BLOCK => Node::Block { first, second },
        Kind::ASSIGN => Node::Assign { target: first,
                                       value:  second, },
        Kind::INCREMENT => {
            let (fixity, target) = step_target(first, second);
            Node::Increment { fixity, target }
        },
        Kind::DECREMENT => {
            let (fixity, target) = step_target(first, second);
            Node::Decrement { fixity, target }
        },
        Kind::IF => Node::If { condition:   first,
                               then_branch: second,
                               else_branch: third, },
        Kind::ELSE => Node::Else { body: first },
        Kind::WHILE => Node::While { condition: first,
                                     body:      second, },
        Kind::DO => Node::DoWhile { body:      first,
                                    condition: second, },
        Kind::FOR => Node::For { init:      first,
                                 condition: second,
                                 step:      third,
                                 body:      fourth, },
        Kind::PRINT => Node::Print { operand:  first,
                                     argument: second, },
        Kind::SCAN => Node::Scan { target: first },
        other => Node::Unknown(other),
    }
}

/// `+` and `-` are unary only when their second slot is empty.
const fn unary_operator(kind: Kind, has_second: bool) -> Option<UnaryOperator> {
    match kind {
        Kind::ADD if !has_second => Some(UnaryOperator::Plus),
        Kind::SUB if !has_second => Some(UnaryOperator::Negate),
        Kind::BIT_NOT => Some(UnaryOperator::BitNot),
        Kind::NOT => Some(UnaryOperator::Not),
        Kind::NOT_WORD => Some(UnaryOperator::NotWord),
        _ => None,
    }
}

const fn binary_operator(kind: Kind) -> Option<BinaryOperator> {
    use BinaryOperator::{
        Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod,
        Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
    };
    let op = match kind {
        Kind::ADD => Add,
        Kind::SUB => Sub,
        Kind::MUL => Mul,
        Kind::DIV => Div,
        Kind::MOD => Mod,
        Kind::SHIFT_LEFT => ShiftLeft,
        Kind::SHIFT_RIGHT => ShiftRight,
        Kind::BIT_AND => BitAnd,
        Kind::BIT_XOR => BitXor,
        Kind::BIT_OR => BitOr,
        Kind::EQUAL => Equal,
        Kind::NOT_EQUAL => NotEqual,
        Kind::LESS => Less,
        Kind::GREATER => Greater,
        Kind::LESS_EQUAL => LessEqual,
        Kind::GREATER_EQUAL => GreaterEqual,
        Kind::AND => And,
        Kind::OR => Or,
        _ => return None,
    };
    Some(op)
}

const fn compound_operator(kind: Kind) -> Option<BinaryOperator> {
    use BinaryOperator::{Add, BitAnd, BitOr, BitXor, Div, Mod, Mul, ShiftLeft, ShiftRight, Sub};
    let op = match kind {
        Kind::MUL_ASSIGN => Mul,
        Kind::DIV_ASSIGN => Div,
        Kind::MOD_ASSIGN => Mod,
        Kind::ADD_ASSIGN => Add,
        Kind::SUB_ASSIGN => Sub,
        Kind::SHIFT_LEFT_ASSIGN => ShiftLeft,
        Kind::SHIFT_RIGHT_ASSIGN => ShiftRight,
        Kind::BIT_AND_ASSIGN => BitAnd,
        Kind::BIT_XOR_ASSIGN => BitXor,
        Kind::BIT_OR_ASSIGN => BitOr,
        _ => return None,
    };
    Some(op)
}

/// Picks the target of `++`/`--`: the first slot means prefix, the second
/// postfix.
fn step_target(first: Child, second: Child) -> (Fixity, Child) {
    match first {
        Some(target) => (Fixity::Prefix, Some(target)),
        None => (Fixity::Postfix, second),
    }
}

/// Builds an integer literal leaf.
///
/// ## Example
/// ```
/// use mikroc::{ast::Node, interpreter::factory::make_integer};
///
/// assert!(matches!(make_integer(42), Node::Integer(ref value) if value.get() == 42));
/// ```
#[must_use]
pub const fn make_integer(value: i32) -> Node {
    Node::Integer(Cell::new(value))
}

impl Context {
    /// Builds a string literal leaf, interning `text`.
    ///
    /// A text seen before reuses its buffer; a new one is copied into the
    /// string table.
    pub fn make_string(&mut self, text: &str) -> Node {
        Node::Str(self.strings.intern(text))
    }

    /// Builds a variable leaf for `name`.
    ///
    /// The first mention of a name registers a zero-initialised cell; later
    /// mentions share it, so an assignment through one leaf is visible
    /// through every other.
    ///
    /// ## Example
    /// ```
    /// use mikroc::{ast::Node, interpreter::context::Context};
    ///
    /// let mut context = Context::new();
    /// let (Node::Variable(a), Node::Variable(b)) =
    ///     (context.make_variable("x"), context.make_variable("x"))
    /// else {
    ///     unreachable!()
    /// };
    ///
    /// assert_eq!(a, b);
    /// assert_eq!(context.variables.get(a), 0);
    /// ```
    pub fn make_variable(&mut self, name: &str) -> Node {
        Node::Variable(self.variables.intern(name))
    }
}
