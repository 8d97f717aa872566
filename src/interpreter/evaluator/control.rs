use std::io::{BufRead, Write};

use crate::{
    ast::Child,
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

impl<R: BufRead, W: Write> Evaluator<'_, R, W> {
    /// Runs the then-branch when the condition is nonzero, the else-branch
    /// otherwise. Always yields `0`.
    pub(super) fn eval_if(&mut self,
                          condition: &Child,
                          then_branch: &Child,
                          else_branch: &Child)
                          -> EvalResult<i32> {
        if self.eval_child(condition)? != 0 {
            self.eval_child(then_branch)?;
        } else {
            self.eval_child(else_branch)?;
        }
        Ok(0)
    }

    pub(super) fn eval_while(&mut self,
                             condition: &Child,
                             body: &Child)
                             -> EvalResult<i32> {
        let mut iterations: u64 = 0;
        while self.eval_child(condition)? != 0 {
            self.eval_child(body)?;
            iterations += 1;
        }
        tracing::trace!(iterations, "while loop finished");
        Ok(0)
    }

    /// The body runs once before the condition is first tested.
    pub(super) fn eval_do_while(&mut self,
                                body: &Child,
                                condition: &Child)
                                -> EvalResult<i32> {
        let mut iterations: u64 = 0;
        loop {
            self.eval_child(body)?;
            iterations += 1;
            if self.eval_child(condition)? == 0 {
                break;
            }
        }
        tracing::trace!(iterations, "do-while loop finished");
        Ok(0)
    }

    /// `init` once, then `body` and `step` while `condition` is nonzero.
    /// A missing condition is `0`, so the loop body never runs.
    pub(super) fn eval_for(&mut self,
                           init: &Child,
                           condition: &Child,
                           step: &Child,
                           body: &Child)
                           -> EvalResult<i32> {
        self.eval_child(init)?;

        let mut iterations: u64 = 0;
        while self.eval_child(condition)? != 0 {
            self.eval_child(body)?;
            self.eval_child(step)?;
            iterations += 1;
        }
        tracing::trace!(iterations, "for loop finished");
        Ok(0)
    }
}
