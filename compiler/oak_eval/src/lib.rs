//! Oak Eval - tree-walking interpreter for the Oak language.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Heap`: generational handle store for strings, lists, objects,
//!   closures and scopes, with mark-and-sweep collection
//! - Scope chain: heap-allocated scopes reached through `ScopeId`
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `try_match` / `select_clause`: structural pattern matching for `if`
//! - `Scheduler`: completion queue connecting host threads to callbacks
//!
//! Evaluation is single-threaded. Host operations run on helper threads and
//! hand results back through the scheduler's channel; the interpreter runs
//! their callbacks one at a time from [`Interpreter::run_event_loop`].

pub mod builtins;
pub mod config;
mod environment;
pub mod errors;
pub mod interpreter;
pub mod matcher;
mod operators;
mod print_handler;
pub mod scheduler;
mod unary_operators;
pub mod value;

pub use config::InterpreterConfig;
pub use environment::{AssignError, Scope, ScopeId};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, NativeFn, ProgramOutcome};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use scheduler::{
    Completion, CompletionSender, EventLoopReport, HostValue, OperationId, Scheduler,
};
pub use unary_operators::evaluate_unary;
pub use value::{DisplayMode, GcStats, Handle, Heap, Value};
