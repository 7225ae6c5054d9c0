//! Oak lexer and recursive descent parser.
//!
//! `parse` turns source text into a [`Program`]: a frozen expression arena
//! plus the top-level expressions in order. Pipe (`|>`) and `with` are
//! desugared here into plain calls, so the evaluator never sees them.

mod cursor;
mod error;
mod grammar;
mod lexer;
mod token;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::lex;
pub use token::{Token, TokenKind};

use oak_ir::{Expr, ExprArena, ExprId, ExprKind, Program, SharedArena, Span, StringInterner};
use tracing::debug;

use cursor::Cursor;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor,
    arena: ExprArena,
    interner: &'a StringInterner,
}

impl<'a> Parser<'a> {
    /// Create a parser over a lexed token list.
    pub fn new(tokens: Vec<Token>, source_len: usize, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::with_capacity(source_len),
            interner,
        }
    }

    /// Parse a whole program: comma-separated expressions up to end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        self.cursor.skip_commas();
        while !self.cursor.is_at_end() {
            body.push(self.parse_expr()?);
            if !self.cursor.is_at_end() {
                self.cursor.expect(&TokenKind::Comma, "`,` or a new line")?;
            }
            self.cursor.skip_commas();
        }
        debug!(
            expressions = self.arena.expr_count(),
            top_level = body.len(),
            "parsed program"
        );
        Ok(Program {
            arena: SharedArena::new(self.arena),
            body,
        })
    }

    #[inline]
    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }
}

/// Lex and parse `source`.
pub fn parse(source: &str, interner: &StringInterner) -> Result<Program, ParseError> {
    let tokens = lex(source, interner)?;
    Parser::new(tokens, source.len(), interner).parse_program()
}

#[cfg(test)]
mod tests;
