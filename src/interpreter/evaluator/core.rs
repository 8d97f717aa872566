use std::io::{BufRead, Write};

use crate::{
    ast::{Child, Node},
    error::RuntimeError,
    interpreter::{context::Context, symbols::StrId},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the fatal
/// `RuntimeError` that stopped the program.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Executes a syntax tree.
///
/// The evaluator borrows the [`Context`] the tree was built against, so that
/// variable and string handles in the nodes resolve to its tables. Program
/// output goes to `output` and `scan` reads from `input`; the binary passes
/// the process's standard streams, tests pass in-memory buffers.
///
/// ## Usage
/// ```
/// use mikroc::{
///     ast::Kind,
///     interpreter::{
///         context::Context,
///         evaluator::core::Evaluator,
///         factory::{make_integer, make_operator},
///     },
/// };
///
/// let mut context = Context::new();
/// let x = context.make_variable("x");
/// let assign = make_operator(Kind::ASSIGN, Some(x), Some(make_integer(5)), None, None);
/// let print = make_operator(Kind::PRINT, Some(context.make_variable("x")), None, None, None);
/// let program = make_operator(Kind::BLOCK, Some(assign), Some(print), None, None);
///
/// let mut evaluator = Evaluator::new(&mut context, std::io::empty(), Vec::new());
/// evaluator.run(Some(&program)).unwrap();
///
/// assert_eq!(evaluator.into_output(), b"5");
/// ```
pub struct Evaluator<'c, R, W> {
    pub(super) context: &'c mut Context,
    pub(super) input:   R,
    pub(super) output:  W,
}

impl<'c, R: BufRead, W: Write> Evaluator<'c, R, W> {
    /// Creates an evaluator over `context` with the given console streams.
    pub fn new(context: &'c mut Context,
               input: R,
               output: W)
               -> Self {
        Self { context,
               input,
               output }
    }

    /// Evaluates a whole program and flushes its output.
    ///
    /// An absent root is an empty program. Output produced before a fatal
    /// error is flushed as well, so that it appears before the diagnostic.
    ///
    /// # Errors
    /// The first fatal [`RuntimeError`] raised anywhere in the tree.
    pub fn run(&mut self, root: Option<&Node>) -> EvalResult<()> {
        tracing::debug!(variables = self.context.variables.len(),
                        strings = self.context.strings.len(),
                        "evaluating program");

        let result = root.map_or(Ok(0), |node| self.eval(node));
        let flushed = self.output.flush();

        result?;
        flushed?;
        tracing::debug!("program finished");
        Ok(())
    }

    /// Evaluates one node and returns its integer value.
    ///
    /// Statements evaluate to `0`; expressions to their value. Side effects
    /// (variable updates, output, input) happen in evaluation order, children
    /// from first to last.
    ///
    /// # Errors
    /// Division by zero, arithmetic faults of compound division, unknown
    /// nodes, invalid assignment targets and console I/O failures.
    pub fn eval(&mut self, node: &Node) -> EvalResult<i32> {
        match node {
            Node::Integer(value) => Ok(value.get()),
            Node::Str(id) => Ok(self.string_value(*id)),
            Node::Variable(id) => Ok(self.context.variables.get(*id)),
            Node::Block { .. } => self.eval_block(node),
            Node::Unary { op, operand } => self.eval_unary(*op, operand),
            Node::Binary { op, left, right } => self.eval_binary(*op, left, right),
            Node::Assign { target, value } => self.eval_assign(target, value),
            Node::CompoundAssign { op, target, value } => {
                self.eval_compound_assign(*op, target, value)
            },
            Node::Increment { fixity, target } => self.eval_step(*fixity, 1, target),
            Node::Decrement { fixity, target } => self.eval_step(*fixity, -1, target),
            Node::If { condition,
                       then_branch,
                       else_branch, } => self.eval_if(condition, then_branch, else_branch),
            Node::Else { body } => self.eval_child(body),
            Node::While { condition, body } => self.eval_while(condition, body),
            Node::DoWhile { body, condition } => self.eval_do_while(body, condition),
            Node::For { init,
                        condition,
                        step,
                        body, } => self.eval_for(init, condition, step, body),
            Node::Print { operand, argument } => self.eval_print(operand, argument),
            Node::Scan { target } => self.eval_scan(target),
            Node::Unknown(kind) => Err(RuntimeError::UnknownSymbol(*kind)),
        }
    }

    /// Runs a chain of left-nested blocks in source order.
    ///
    /// The chain is walked down its `first` spine and replayed from the
    /// innermost statement outwards, so its length costs no stack depth.
    fn eval_block(&mut self, node: &Node) -> EvalResult<i32> {
        let mut pending = Vec::new();
        let mut current = Some(node);

        while let Some(Node::Block { first, second }) = current {
            pending.push(second);
            current = first.as_deref();
        }

        if let Some(head) = current {
            self.eval(head)?;
        }
        for statement in pending.into_iter().rev() {
            self.eval_child(statement)?;
        }
        Ok(0)
    }

    /// Evaluates an optional child; an absent child is `0`.
    pub fn eval_child(&mut self, child: &Child) -> EvalResult<i32> {
        child.as_deref().map_or(Ok(0), |node| self.eval(node))
    }

    /// A string literal used as an integer is its first character, as a
    /// signed `char`. The empty string yields its terminator, `0`.
    fn string_value(&self, id: StrId) -> i32 {
        self.context
            .strings
            .get(id)
            .as_bytes()
            .first()
            .map_or(0, |&byte| i32::from(i8::from_ne_bytes([byte])))
    }

    /// The context the evaluator runs against.
    #[must_use]
    pub fn context(&self) -> &Context {
        self.context
    }

    /// Consumes the evaluator, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}
