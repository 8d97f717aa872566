use std::{collections::HashMap, rc::Rc};

/// Handle to a variable's storage cell in a [`VariableTable`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VarId(usize);

/// Handle to an interned buffer in a [`StringTable`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StrId(usize);

/// Maps variable names to integer storage cells.
///
/// Every distinct name owns exactly one cell for the lifetime of the table.
/// Cells are created zero-initialised the first time a name is interned and
/// are never removed, so every [`VarId`] handed out stays valid.
///
/// ## Example
/// ```
/// use mikroc::interpreter::symbols::VariableTable;
///
/// let mut table = VariableTable::new();
/// let x = table.intern("x");
/// assert_eq!(table.get(x), 0);
///
/// table.set(x, 7);
/// let again = table.intern("x");
/// assert_eq!(table.get(again), 7);
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct VariableTable {
    slots: HashMap<String, VarId>,
    cells: Vec<i32>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell for `name`, registering a zeroed one on first sight.
    pub fn intern(&mut self, name: &str) -> VarId {
        if let Some(id) = self.slots.get(name) {
            return *id;
        }

        let id = VarId(self.cells.len());
        self.cells.push(0);
        self.slots.insert(name.to_string(), id);
        tracing::debug!(name, slot = id.0, "registered variable");
        id
    }

    /// Looks up a name without registering it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.slots.get(name).copied()
    }

    /// Current value of a cell.
    #[must_use]
    pub fn get(&self, id: VarId) -> i32 {
        self.cells[id.0]
    }

    /// Overwrites a cell.
    pub fn set(&mut self, id: VarId, value: i32) {
        self.cells[id.0] = value;
    }

    /// Number of registered variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no variable has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Interns string literals.
///
/// Identical texts share one immutable buffer; interning the same text twice
/// yields the same [`StrId`] and no new allocation.
///
/// ## Example
/// ```
/// use std::rc::Rc;
///
/// use mikroc::interpreter::symbols::StringTable;
///
/// let mut table = StringTable::new();
/// let a = table.intern("%d\n");
/// let b = table.intern("%d\n");
///
/// assert_eq!(a, b);
/// assert!(Rc::ptr_eq(table.get(a), table.get(b)));
/// ```
#[derive(Debug, Default)]
pub struct StringTable {
    ids:     HashMap<Rc<str>, StrId>,
    buffers: Vec<Rc<str>>,
}

impl StringTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buffer for `text`, copying it in on first sight.
    pub fn intern(&mut self, text: &str) -> StrId {
        if let Some(id) = self.ids.get(text) {
            return *id;
        }

        let buffer: Rc<str> = Rc::from(text);
        let id = StrId(self.buffers.len());
        self.buffers.push(Rc::clone(&buffer));
        self.ids.insert(buffer, id);
        tracing::debug!(text, slot = id.0, "interned string");
        id
    }

    /// The interned buffer behind a handle.
    #[must_use]
    pub fn get(&self, id: StrId) -> &Rc<str> {
        &self.buffers[id.0]
    }

    /// Number of distinct strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether no string has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
