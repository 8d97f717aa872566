use crate::interpreter::symbols::{StringTable, VariableTable};

/// Stores the state shared by AST construction and evaluation.
///
/// A `Context` is created once per program. The parser fills its tables
/// through the node factory ([`Context::make_variable`],
/// [`Context::make_string`]); the evaluator then reads string literals and
/// reads and writes variable cells through it. Nothing is ever removed, so
/// every handle stored in a node stays valid for as long as the context
/// lives.
///
/// ## Usage
/// ```
/// use mikroc::interpreter::context::Context;
///
/// let mut context = Context::new();
/// let node = context.make_variable("total");
///
/// assert_eq!(context.variables.len(), 1);
/// assert!(context.strings.is_empty());
/// # let _ = node;
/// ```
#[derive(Debug, Default)]
pub struct Context {
    /// Storage cells of every variable seen so far.
    pub variables: VariableTable,
    /// Every distinct string literal seen so far.
    pub strings:   StringTable,
}

impl Context {
    /// Creates a context with empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the variable called `name`, if it was ever mentioned.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<i32> {
        self.variables.lookup(name).map(|id| self.variables.get(id))
    }
}
