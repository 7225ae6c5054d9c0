//! `if` expressions and pattern lowering.
//!
//! Patterns are parsed as ordinary expressions and then lowered: `_`, lists,
//! objects and `name := ...` become structural patterns; everything else is
//! compared by value at match time.

use oak_ir::{Clause, ExprId, ExprKind, Pattern, PatternEntry, PatternId, StrId};

use crate::{ParseError, ParseErrorKind, Parser, TokenKind};

impl Parser<'_> {
    /// `if subject { p1 -> a, p2, p3 -> b }`, or `if { cond -> a }` which
    /// matches its clauses against `true`.
    pub(crate) fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let subject = if self.cursor.check(&TokenKind::LBrace) {
            self.alloc(ExprKind::Bool(true), start)
        } else {
            self.parse_expr()?
        };

        self.cursor.expect(&TokenKind::LBrace, "`{`")?;
        self.cursor.skip_commas();
        let mut clauses = Vec::new();
        while !self.cursor.eat(&TokenKind::RBrace) {
            let mut alternatives = vec![self.parse_pattern()?];
            while self.cursor.eat(&TokenKind::Comma) {
                self.cursor.skip_commas();
                alternatives.push(self.parse_pattern()?);
            }
            self.cursor.expect(&TokenKind::Arrow, "`->`")?;
            let body = self.parse_expr()?;

            // Alternatives share one body but stay separate clauses, so each
            // is tried in order like any other.
            for pattern in alternatives {
                let patterns = self.arena.alloc_pattern_list([pattern]);
                clauses.push(Clause { patterns, body });
            }

            if !self.cursor.check(&TokenKind::RBrace) {
                self.cursor.expect(&TokenKind::Comma, "`,` or `}`")?;
            }
            self.cursor.skip_commas();
        }

        let span = start.merge(self.cursor.previous_span());
        let subjects = self.arena.alloc_expr_list([subject]);
        let clauses = self.arena.alloc_clauses(clauses);
        Ok(self.alloc(ExprKind::Match { subjects, clauses }, span))
    }

    fn parse_pattern(&mut self) -> Result<PatternId, ParseError> {
        let expr = self.parse_expr()?;
        self.lower_pattern(expr)
    }

    /// Turn a parsed expression into a pattern.
    pub(crate) fn lower_pattern(&mut self, expr: ExprId) -> Result<PatternId, ParseError> {
        let pattern = match self.arena.get_expr(expr).kind.clone() {
            ExprKind::Empty => Pattern::Empty { bind: None },
            ExprKind::Define { target, value } => {
                let ExprKind::Ident(name) = self.arena.get_expr(target).kind else {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignTarget,
                        self.span_of(target),
                    ));
                };
                let inner = self.lower_pattern(value)?;
                match self.arena.get_pattern(inner) {
                    Pattern::Empty { bind: None } => Pattern::Empty { bind: Some(name) },
                    _ => Pattern::Bind {
                        name,
                        pattern: inner,
                    },
                }
            }
            ExprKind::List(range) => {
                let elems = self.arena.get_expr_list(range).to_vec();
                let mut lowered = Vec::with_capacity(elems.len());
                for elem in elems {
                    lowered.push(self.lower_pattern(elem)?);
                }
                Pattern::List(self.arena.alloc_pattern_list(lowered))
            }
            ExprKind::Object(range) => {
                let entries = self.arena.get_entries(range).to_vec();
                let mut lowered = Vec::with_capacity(entries.len());
                for entry in entries {
                    let key = self.pattern_key(entry.key)?;
                    let pattern = self.lower_pattern(entry.value)?;
                    lowered.push(PatternEntry { key, pattern });
                }
                Pattern::Object(self.arena.alloc_pattern_entries(lowered))
            }
            _ => Pattern::Expr(expr),
        };
        Ok(self.arena.alloc_pattern(pattern))
    }

    /// Object pattern keys are fixed at parse time.
    fn pattern_key(&mut self, key: ExprId) -> Result<StrId, ParseError> {
        let bytes: Vec<u8> = match self.arena.get_expr(key).kind {
            ExprKind::Str(id) => return Ok(id),
            ExprKind::Atom(name) => self.interner.lookup(name).as_bytes().to_vec(),
            ExprKind::Int(n) => n.to_string().into_bytes(),
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidPatternKey,
                    self.span_of(key),
                ))
            }
        };
        Ok(self.arena.alloc_str(bytes))
    }
}
