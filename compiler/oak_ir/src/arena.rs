//! Flat expression arena.
//!
//! The parser allocates every node here; the evaluator reads nodes by index.
//! Once parsing finishes the arena is frozen into a `SharedArena` so that
//! closures can keep their defining arena alive after the `Program` is gone.

use std::fmt;
use std::sync::Arc;

use crate::{
    Clause, ClauseRange, EntryRange, Expr, ExprId, ExprRange, FunctionDef, FunctionId, Name,
    ObjectEntry, ParamRange, Pattern, PatternEntry, PatternEntryRange, PatternId, PatternRange,
    StrId,
};

/// Convert a table length into a `u32` index.
///
/// # Panics
/// Panics if a single parse produces more than `u32::MAX` entries in one table.
#[inline]
fn index_of(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX entries"))
}

/// Append `items` to `table` and return the `(start, len)` of the new run.
fn extend_table<T>(table: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> (u32, u32) {
    let start = index_of(table.len());
    table.extend(items);
    let len = index_of(table.len()) - start;
    (start, len)
}

/// Arena of expression nodes and their side tables.
#[derive(Default)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (call args, list elements, block bodies, subjects).
    expr_lists: Vec<ExprId>,
    /// String literal bytes (indexed by `StrId`).
    strings: Vec<Box<[u8]>>,
    /// Function literals (indexed by `FunctionId`).
    functions: Vec<FunctionDef>,
    /// Flattened parameter names.
    params: Vec<Name>,
    /// Object literal entries.
    entries: Vec<ObjectEntry>,
    /// Match clauses.
    clauses: Vec<Clause>,
    /// All patterns (indexed by `PatternId`).
    patterns: Vec<Pattern>,
    /// Flattened pattern lists.
    pattern_lists: Vec<PatternId>,
    /// Object pattern entries.
    pattern_entries: Vec<PatternEntry>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity estimated from the source size
    /// (roughly one expression per eight bytes of source).
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
            ..Self::default()
        }
    }

    // Expressions

    /// Allocate expression, return ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(index_of(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Number of expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate expression list, return range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let (start, len) = extend_table(&mut self.expr_lists, exprs);
        ExprRange::new(start, len)
    }

    /// Get expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.bounds()]
    }

    // String literals

    /// Store string literal bytes.
    pub fn alloc_str(&mut self, bytes: impl Into<Box<[u8]>>) -> StrId {
        let id = StrId::new(index_of(self.strings.len()));
        self.strings.push(bytes.into());
        id
    }

    /// Get string literal bytes.
    #[inline]
    pub fn get_str(&self, id: StrId) -> &[u8] {
        &self.strings[id.index()]
    }

    // Functions

    /// Allocate function literal.
    pub fn alloc_function(&mut self, def: FunctionDef) -> FunctionId {
        let id = FunctionId::new(index_of(self.functions.len()));
        self.functions.push(def);
        id
    }

    /// Get function literal.
    #[inline]
    pub fn get_function(&self, id: FunctionId) -> &FunctionDef {
        &self.functions[id.index()]
    }

    /// Allocate parameter names.
    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Name>) -> ParamRange {
        let (start, len) = extend_table(&mut self.params, params);
        ParamRange::new(start, len)
    }

    /// Get parameter names.
    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Name] {
        &self.params[range.bounds()]
    }

    // Object literals

    /// Allocate object literal entries.
    pub fn alloc_entries(&mut self, entries: impl IntoIterator<Item = ObjectEntry>) -> EntryRange {
        let (start, len) = extend_table(&mut self.entries, entries);
        EntryRange::new(start, len)
    }

    /// Get object literal entries.
    #[inline]
    pub fn get_entries(&self, range: EntryRange) -> &[ObjectEntry] {
        &self.entries[range.bounds()]
    }

    // Match clauses and patterns

    /// Allocate match clauses.
    pub fn alloc_clauses(&mut self, clauses: impl IntoIterator<Item = Clause>) -> ClauseRange {
        let (start, len) = extend_table(&mut self.clauses, clauses);
        ClauseRange::new(start, len)
    }

    /// Get match clauses.
    #[inline]
    pub fn get_clauses(&self, range: ClauseRange) -> &[Clause] {
        &self.clauses[range.bounds()]
    }

    /// Allocate pattern, return ID.
    pub fn alloc_pattern(&mut self, pattern: Pattern) -> PatternId {
        let id = PatternId::new(index_of(self.patterns.len()));
        self.patterns.push(pattern);
        id
    }

    /// Get pattern by ID.
    #[inline]
    pub fn get_pattern(&self, id: PatternId) -> &Pattern {
        &self.patterns[id.index()]
    }

    /// Allocate pattern list, return range.
    pub fn alloc_pattern_list(
        &mut self,
        patterns: impl IntoIterator<Item = PatternId>,
    ) -> PatternRange {
        let (start, len) = extend_table(&mut self.pattern_lists, patterns);
        PatternRange::new(start, len)
    }

    /// Get pattern list by range.
    #[inline]
    pub fn get_pattern_list(&self, range: PatternRange) -> &[PatternId] {
        &self.pattern_lists[range.bounds()]
    }

    /// Allocate object pattern entries.
    pub fn alloc_pattern_entries(
        &mut self,
        entries: impl IntoIterator<Item = PatternEntry>,
    ) -> PatternEntryRange {
        let (start, len) = extend_table(&mut self.pattern_entries, entries);
        PatternEntryRange::new(start, len)
    }

    /// Get object pattern entries.
    #[inline]
    pub fn get_pattern_entries(&self, range: PatternEntryRange) -> &[PatternEntry] {
        &self.pattern_entries[range.bounds()]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("functions", &self.functions.len())
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}

/// Frozen, shareable expression arena.
///
/// Function values carry one of these so their bodies remain evaluable after
/// the parse that produced them has been dropped.
#[derive(Clone)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    /// Freeze an arena for sharing.
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether two handles refer to the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedArena({:?})", &*self.0)
    }
}

/// A parsed source unit: the frozen arena plus its top-level expressions.
#[derive(Clone, Debug)]
pub struct Program {
    pub arena: SharedArena,
    pub body: Vec<ExprId>,
}
