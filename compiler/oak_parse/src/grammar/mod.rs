//! Grammar rules, as `impl Parser` blocks.
//!
//! - `expr`: entry point, assignment, pipelines and the binary precedence chain
//! - `operators`: token to operator mapping per precedence level
//! - `primary`: literals, names, groups, lists, objects, blocks, functions, `with`
//! - `patterns`: `if` expressions and expression-to-pattern lowering

mod expr;
mod operators;
mod patterns;
mod primary;
