//! Oak - a small dynamically typed language with callback-based async I/O.
//!
//! This crate ties the front end and the evaluator together:
//! [`run_source`] parses a program, evaluates it, then drives the event
//! loop until every host operation has completed. The `oak` binary is a
//! thin wrapper over [`commands`].
//!
//! # Logging
//!
//! Library crates emit `tracing` events only. [`init_tracing`] installs a
//! subscriber, and only when `RUST_LOG` is set, e.g.
//! `RUST_LOG=oak_eval=debug oak run script.oak`.

pub mod commands;

use std::sync::Once;

use oak_eval::{DisplayMode, EvalError, EventLoopReport, Interpreter};
use oak_parse::ParseError;
use thiserror::Error;

pub use oak_eval::{InterpreterBuilder, InterpreterConfig};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Why a program could not be run at all: it failed to parse, or its
/// final value could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl RunError {
    /// `path:line:col: error: message`, or without the location when the
    /// error has no span.
    pub fn render(&self, path: &str, source: &str) -> String {
        let span = match self {
            RunError::Parse(err) => Some(err.span),
            RunError::Eval(err) => err.span,
        };
        match span {
            Some(span) => format!("{path}:{}: error: {self}", span.line_col(source)),
            None => format!("{path}: error: {self}"),
        }
    }
}

/// What a completed run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Debug rendering of the program's last top-level value, taken after
    /// the event loop finished.
    pub value: String,
    /// Errors of aborted top-level statements, in source order.
    pub errors: Vec<EvalError>,
    /// Callbacks run and errors raised while draining host operations.
    pub report: EventLoopReport,
}

impl RunOutcome {
    /// No statement or callback failed and no completion was rejected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.report.is_clean()
    }

    /// Every error of the run rendered as by [`RunError::render`]:
    /// top-level statements first, then callbacks, then rejected completions.
    pub fn render_errors(&self, path: &str, source: &str) -> Vec<String> {
        self.errors
            .iter()
            .chain(&self.report.errors)
            .chain(&self.report.rejected)
            .map(|err| RunError::Eval(err.clone()).render(path, source))
            .collect()
    }
}

/// Parse and evaluate `source`, then run callbacks until no host operation
/// is pending.
///
/// Only a parse error stops the run before evaluation. A failing top-level
/// statement is recorded and the remaining statements still run; callbacks
/// registered before the failure fire as usual.
pub fn run_source(interpreter: &mut Interpreter, source: &str) -> Result<RunOutcome, RunError> {
    let program = oak_parse::parse(source, interpreter.interner())?;
    let outcome = interpreter.eval_program(&program);

    interpreter.pin(outcome.value);
    let report = interpreter.run_event_loop();
    let rendered = interpreter.display(outcome.value, DisplayMode::Debug);
    interpreter.unpin(outcome.value);

    Ok(RunOutcome {
        value: rendered?,
        errors: outcome.errors,
        report,
    })
}
