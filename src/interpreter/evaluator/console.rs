use std::io::{self, BufRead, Write};

use crate::{
    ast::{Child, Node},
    interpreter::evaluator::{
        assign::Place,
        core::{EvalResult, Evaluator},
        format::render,
    },
};

impl<R: BufRead, W: Write> Evaluator<'_, R, W> {
    /// Prints the operand.
    ///
    /// An integer-valued operand is written in decimal and any argument is
    /// ignored. A string literal is a template rendered with the optional
    /// argument. Yields `0`.
    pub(super) fn eval_print(&mut self,
                             operand: &Child,
                             argument: &Child)
                             -> EvalResult<i32> {
        if let Some(Node::Str(id)) = operand.as_deref() {
            let template = self.context.strings.get(*id).clone();
            let argument = match argument {
                Some(node) => Some(self.eval(node)?),
                None => None,
            };
            self.output.write_all(&render(&template, argument))?;
        } else {
            let value = self.eval_child(operand)?;
            write!(self.output, "{value}")?;
        }
        Ok(0)
    }

    /// Reads one integer from the input into the target.
    ///
    /// Pending output is flushed first so that prompts are visible. When the
    /// input holds no integer the target keeps its value. Yields `0`.
    pub(super) fn eval_scan(&mut self, target: &Child) -> EvalResult<i32> {
        let place = Place::of(target)?;
        self.output.flush()?;

        match read_integer(&mut self.input)? {
            Some(value) => self.store(&place, value),
            None => tracing::warn!("scan found no integer, target left unchanged"),
        }
        Ok(0)
    }
}

/// Reads an optionally signed decimal integer, skipping leading whitespace.
///
/// Only the bytes that form the number are consumed. Digits beyond the range
/// of `i32` wrap around.
///
/// # Returns
/// `None` at the end of input or when no digit follows the optional sign.
///
/// # Errors
/// Errors of the underlying reader.
///
/// # Example
/// ```
/// use mikroc::interpreter::evaluator::console::read_integer;
///
/// let mut input = "  -12\n7 x".as_bytes();
/// assert_eq!(read_integer(&mut input).unwrap(), Some(-12));
/// assert_eq!(read_integer(&mut input).unwrap(), Some(7));
/// assert_eq!(read_integer(&mut input).unwrap(), None);
/// ```
pub fn read_integer<R: BufRead>(input: &mut R) -> io::Result<Option<i32>> {
    while peek_byte(input)?.is_some_and(|b| b.is_ascii_whitespace()) {
        input.consume(1);
    }

    let negative = match peek_byte(input)? {
        Some(sign @ (b'-' | b'+')) => {
            input.consume(1);
            sign == b'-'
        },
        _ => false,
    };

    let mut value: i32 = 0;
    let mut any_digit = false;
    while let Some(byte) = peek_byte(input)?.filter(u8::is_ascii_digit) {
        value = value.wrapping_mul(10).wrapping_add(i32::from(byte - b'0'));
        any_digit = true;
        input.consume(1);
    }

    Ok(any_digit.then(|| if negative { value.wrapping_neg() } else { value }))
}

fn peek_byte<R: BufRead>(input: &mut R) -> io::Result<Option<u8>> {
    Ok(input.fill_buf()?.first().copied())
}
