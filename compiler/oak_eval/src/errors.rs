//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category; factory functions below are
//! the public way to build errors so that messages stay in one place.
//! Errors abort the current top-level evaluation or the current callback;
//! Oak code cannot catch them.

use std::fmt;

use oak_ir::Span;

use crate::scheduler::OperationId;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// An operator or built-in was applied to incompatible values, or a
    /// non-function was called.
    TypeMismatch {
        expected: String,
        got: String,
        operation: String,
    },
    /// Name resolution or `<-` found no binding through the root scope.
    UnboundName { name: String },
    /// A continuation was completed a second time.
    ReentrantCallback { operation: OperationId },
    /// A completion arrived for an operation that was never registered.
    UnknownOperation { operation: OperationId },
    /// Integer `/` or `%` by zero.
    DivisionByZero,
    /// Checked integer arithmetic overflowed.
    IntegerOverflow { operation: String },
    /// Property assignment outside `0..=len`.
    IndexOutOfBounds { index: i64, len: usize },
    /// Non-tail recursion deeper than the configured limit.
    CallDepthExceeded { depth: usize },
    /// A heap handle outlived its object. Indicates a runtime bug, not a
    /// user error.
    InvalidReference,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                expected,
                got,
                operation,
            } => write!(f, "type mismatch in {operation}: expected {expected}, got {got}"),
            Self::UnboundName { name } => write!(f, "{name} is not defined"),
            Self::ReentrantCallback { operation } => {
                write!(f, "operation {operation} already completed")
            }
            Self::UnknownOperation { operation } => {
                write!(f, "no pending operation {operation}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::CallDepthExceeded { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::InvalidReference => write!(f, "invalid heap reference"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost expression being evaluated when the error was raised.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

// Type errors

#[cold]
pub fn type_mismatch(operation: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
        operation: operation.to_string(),
    })
}

/// Binary operator applied to an unsupported pair.
#[cold]
pub fn binary_type_mismatch(operation: &str, expected: &str, left: &Value, right: &Value) -> EvalError {
    type_mismatch(
        operation,
        expected,
        &format!("{} and {}", left.type_name(), right.type_name()),
    )
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    type_mismatch("call", "function", value.type_name())
}

// Names

#[cold]
pub fn unbound_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundName {
        name: name.to_string(),
    })
}

// Scheduler

#[cold]
pub fn reentrant_callback(operation: OperationId) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReentrantCallback { operation })
}

#[cold]
pub fn unknown_operation(operation: OperationId) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperation { operation })
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Access

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

// Runtime limits and faults

#[cold]
pub fn call_depth_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { depth })
}

#[cold]
pub fn invalid_reference() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidReference)
}
