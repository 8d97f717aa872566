use std::{
    cell::Cell,
    io::{BufRead, Write},
};

use crate::{
    ast::{BinaryOperator, Child, Fixity, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::apply_binary,
            core::{EvalResult, Evaluator},
        },
        symbols::VarId,
    },
};

/// Storage designated by an assignment target.
pub(super) enum Place<'n> {
    /// A variable's cell in the context.
    Variable(VarId),
    /// The payload of an integer literal.
    Literal(&'n Cell<i32>),
}

impl<'n> Place<'n> {
    /// Resolves the node an assignment, `++`, `--` or `scan` writes to.
    pub(super) fn of(target: &'n Child) -> EvalResult<Self> {
        match target.as_deref() {
            Some(Node::Variable(id)) => Ok(Self::Variable(*id)),
            Some(Node::Integer(cell)) => Ok(Self::Literal(cell)),
            Some(other) => Err(RuntimeError::NotAssignable(other.kind())),
            None => Err(RuntimeError::MissingTarget),
        }
    }
}

impl<R: BufRead, W: Write> Evaluator<'_, R, W> {
    pub(super) fn load(&self, place: &Place<'_>) -> i32 {
        match place {
            Place::Variable(id) => self.context.variables.get(*id),
            Place::Literal(cell) => cell.get(),
        }
    }

    pub(super) fn store(&mut self,
                        place: &Place<'_>,
                        value: i32) {
        match place {
            Place::Variable(id) => self.context.variables.set(*id, value),
            Place::Literal(cell) => cell.set(value),
        }
    }

    /// `target = value`: stores and yields the value.
    pub(super) fn eval_assign(&mut self,
                              target: &Child,
                              value: &Child)
                              -> EvalResult<i32> {
        let value = self.eval_child(value)?;
        let place = Place::of(target)?;
        self.store(&place, value);
        Ok(value)
    }

    /// `target op= value`: yields the updated value.
    ///
    /// The right-hand side is evaluated before the target is read. Unlike
    /// the plain operators, `/=` and `%=` do not check for a zero divisor.
    pub(super) fn eval_compound_assign(&mut self,
                                       op: BinaryOperator,
                                       target: &Child,
                                       value: &Child)
                                       -> EvalResult<i32> {
        let rhs = self.eval_child(value)?;
        let place = Place::of(target)?;
        let result = apply_binary(op, self.load(&place), rhs)?;
        self.store(&place, result);
        Ok(result)
    }

    /// `++`/`--` in both fixities; `delta` is `1` or `-1`.
    pub(super) fn eval_step(&mut self,
                            fixity: Fixity,
                            delta: i32,
                            target: &Child)
                            -> EvalResult<i32> {
        let place = Place::of(target)?;
        let old = self.load(&place);
        let new = old.wrapping_add(delta);
        self.store(&place, new);

        Ok(match fixity {
               Fixity::Prefix => new,
               Fixity::Postfix => old,
           })
    }
}
