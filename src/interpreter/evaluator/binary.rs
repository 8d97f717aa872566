use std::io::{BufRead, Write};

use crate::{
    ast::{BinaryOperator, Child},
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

/// Applies a binary operator to two already evaluated operands.
///
/// Arithmetic wraps on overflow like two's-complement hardware. Shift
/// amounts are taken modulo 32 and `>>` is arithmetic. Comparisons and the
/// logical operators yield `1` or `0`.
///
/// This function does not perform the division-by-zero check of the plain
/// `/` and `%` operators; compound assignment relies on that. A zero divisor
/// here is the trap of the raw operation.
///
/// # Errors
/// [`RuntimeError::ArithmeticFault`] when dividing by zero.
///
/// # Example
/// ```
/// use mikroc::{ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::binary::apply_binary};
///
/// assert_eq!(apply_binary(BinaryOperator::Sub, 3, 10).unwrap(), -7);
/// assert_eq!(apply_binary(BinaryOperator::Mod, -7, 3).unwrap(), -1);
/// assert_eq!(apply_binary(BinaryOperator::ShiftLeft, 1, 4).unwrap(), 16);
/// assert_eq!(apply_binary(BinaryOperator::LessEqual, 2, 2).unwrap(), 1);
/// assert!(matches!(apply_binary(BinaryOperator::Div, 1, 0),
///                  Err(RuntimeError::ArithmeticFault { .. })));
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: i32,
                    right: i32)
                    -> EvalResult<i32> {
    use BinaryOperator::{
        Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod,
        Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
    };

    let value = match op {
        Add => left.wrapping_add(right),
        Sub => left.wrapping_sub(right),
        Mul => left.wrapping_mul(right),
        Div | Mod if right == 0 => return Err(RuntimeError::ArithmeticFault { op }),
        Div => left.wrapping_div(right),
        Mod => left.wrapping_rem(right),
        ShiftLeft => left.wrapping_shl(right.cast_unsigned()),
        ShiftRight => left.wrapping_shr(right.cast_unsigned()),
        BitAnd => left & right,
        BitXor => left ^ right,
        BitOr => left | right,
        Equal => i32::from(left == right),
        NotEqual => i32::from(left != right),
        Less => i32::from(left < right),
        Greater => i32::from(left > right),
        LessEqual => i32::from(left <= right),
        GreaterEqual => i32::from(left >= right),
        And => i32::from(left != 0 && right != 0),
        Or => i32::from(left != 0 || right != 0),
    };
    Ok(value)
}

impl<R: BufRead, W: Write> Evaluator<'_, R, W> {
    /// Evaluates both operands, left first, and combines them.
    ///
    /// Both operands are always evaluated, including for `&&` and `||`,
    /// whose right side runs even when the left side already decides the
    /// result. Plain `/` and `%` check for a zero divisor after both sides
    /// have been evaluated.
    pub(super) fn eval_binary(&mut self,
                              op: BinaryOperator,
                              left: &Child,
                              right: &Child)
                              -> EvalResult<i32> {
        let lhs = self.eval_child(left)?;
        let rhs = self.eval_child(right)?;

        if matches!(op, BinaryOperator::Div | BinaryOperator::Mod) && rhs == 0 {
            return Err(RuntimeError::DivisionByZero);
        }

        apply_binary(op, lhs, rhs)
    }
}
