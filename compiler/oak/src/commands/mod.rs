//! Command implementations for the `oak` binary.
//!
//! Each command prints its own diagnostics to stderr and returns the
//! process exit code.

mod eval;
mod run;

pub use eval::eval_expression;
pub use run::run_file;

use oak_eval::{Interpreter, InterpreterConfig};

use crate::RunOutcome;

/// Interpreter for a command-line run: limits from the environment,
/// output to stdout.
fn interpreter() -> Interpreter {
    Interpreter::builder()
        .config(InterpreterConfig::from_env())
        .build()
}

/// Print every error of the run to stderr; returns whether there were any.
fn report_errors(label: &str, source: &str, outcome: &RunOutcome) -> bool {
    for rendered in outcome.render_errors(label, source) {
        eprintln!("{rendered}");
    }
    !outcome.is_clean()
}
