use std::io::{BufRead, Write};

use crate::{
    ast::{Child, UnaryOperator},
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

/// Applies a unary operator to an already evaluated operand.
///
/// Negation wraps, so `-(-2147483648)` stays `-2147483648`. Both spellings
/// of logical NOT yield `1` for `0` and `0` for anything else.
///
/// # Example
/// ```
/// use mikroc::{ast::UnaryOperator, interpreter::evaluator::unary::apply_unary};
///
/// assert_eq!(apply_unary(UnaryOperator::Negate, 5), -5);
/// assert_eq!(apply_unary(UnaryOperator::BitNot, 0), -1);
/// assert_eq!(apply_unary(UnaryOperator::Not, 7), 0);
/// assert_eq!(apply_unary(UnaryOperator::NotWord, 0), 1);
/// ```
#[must_use]
pub const fn apply_unary(op: UnaryOperator, value: i32) -> i32 {
    match op {
        UnaryOperator::Plus => value,
        UnaryOperator::Negate => value.wrapping_neg(),
        UnaryOperator::BitNot => !value,
        UnaryOperator::Not | UnaryOperator::NotWord => (value == 0) as i32,
    }
}

impl<R: BufRead, W: Write> Evaluator<'_, R, W> {
    pub(super) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Child)
                             -> EvalResult<i32> {
        let value = self.eval_child(operand)?;
        Ok(apply_unary(op, value))
    }
}
