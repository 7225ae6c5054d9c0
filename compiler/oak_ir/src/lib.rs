//! Oak IR - shared front-end data structures.
//!
//! This crate holds everything the parser produces and the evaluator consumes:
//! - `Name` / `StringInterner` for identifiers and atoms
//! - `Span` for source locations
//! - The flat expression arena (`ExprArena`, `ExprId`) and its node types
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: names are `Name(u32)`, compared in O(1)
//! - **Flatten the tree**: child nodes are `ExprId` indices, never `Box<Expr>`
//! - **Share arenas**: closures carry a `SharedArena` so a function body stays
//!   valid no matter which parse produced it
//!
//! Sugar (`a |> f(b)`, `with f(a) fn(x) body`) never reaches this IR: the parser
//! lowers both to plain calls.

mod arena;
mod ast;
mod expr_id;
mod interner;
mod name;
mod span;

pub use arena::{ExprArena, Program, SharedArena};
pub use ast::{BinaryOp, Clause, Expr, ExprKind, FunctionDef, ObjectEntry, Pattern, PatternEntry, UnaryOp};
pub use expr_id::{
    ClauseRange, EntryRange, ExprId, ExprRange, FunctionId, ParamRange, PatternEntryRange,
    PatternId, PatternRange, StrId,
};
pub use interner::{SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::{LineCol, Span};
