//! Parse error types.

use oak_ir::{LineCol, Span};
use thiserror::Error;

/// What went wrong while lexing or parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("cannot assign to this expression")]
    InvalidAssignTarget,

    #[error("`<-` needs a plain name on its left")]
    InvalidNonlocalTarget,

    #[error("object pattern keys must be names, strings, atoms or integers")]
    InvalidPatternKey,

    #[error("`with` must be followed by a call")]
    WithWithoutCall,

    #[error("rest parameter must be the last parameter")]
    RestNotLast,
}

/// A lex or parse failure at a source location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn unexpected(expected: &'static str, found: impl Into<String>, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: found.into(),
            },
            span,
        )
    }

    /// Line and column of the error start within `source`.
    pub fn location(&self, source: &str) -> LineCol {
        self.span.line_col(source)
    }
}
