//! Expression entry point and the operator precedence chain.
//!
//! Loosest to tightest:
//!
//! | Level | Operators | Associativity |
//! |---|---|---|
//! | binding | `:=` `<-` | right |
//! | pipeline | `\|>` `<<` | left |
//! | binary | see [`BINARY_LEVELS`] | left |
//! | unary | `-` `!` | prefix |
//! | postfix | call, `.` | left |

use oak_ir::{ExprId, ExprKind};
use oak_stack::ensure_sufficient_stack;

use super::operators::{match_unary_op, BINARY_LEVELS};
use crate::{ParseError, ParseErrorKind, Parser, TokenKind};

impl Parser<'_> {
    /// Parse one expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_binding())
    }

    /// `target := value` and `name <- value`.
    fn parse_binding(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_pipeline()?;
        match self.cursor.current_kind() {
            TokenKind::Define => {
                let target_kind = &self.arena.get_expr(left).kind;
                if !matches!(target_kind, ExprKind::Ident(_) | ExprKind::Property { .. }) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignTarget,
                        self.span_of(left),
                    ));
                }
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = self.span_of(left).merge(self.span_of(value));
                Ok(self.alloc(ExprKind::Define { target: left, value }, span))
            }
            TokenKind::Nonlocal => {
                let ExprKind::Ident(name) = self.arena.get_expr(left).kind else {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidNonlocalTarget,
                        self.span_of(left),
                    ));
                };
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = self.span_of(left).merge(self.span_of(value));
                Ok(self.alloc(ExprKind::Assign { name, value }, span))
            }
            _ => Ok(left),
        }
    }

    /// `a |> f(b)` and `target << value`.
    fn parse_pipeline(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_binary(0)?;
        loop {
            if self.cursor.eat(&TokenKind::Pipe) {
                let right = self.parse_postfix()?;
                left = self.desugar_pipe(left, right);
            } else if self.cursor.eat(&TokenKind::Push) {
                let value = self.parse_binary(0)?;
                let span = self.span_of(left).merge(self.span_of(value));
                left = self.alloc(ExprKind::Push { target: left, value }, span);
            } else {
                return Ok(left);
            }
        }
    }

    /// `a |> f(b, c)` becomes `f(a, b, c)`; `a |> f` becomes `f(a)`.
    fn desugar_pipe(&mut self, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).merge(self.span_of(right));
        let (callee, rest) = match self.arena.get_expr(right).kind {
            ExprKind::Call { callee, args } => (callee, self.arena.get_expr_list(args).to_vec()),
            _ => (right, Vec::new()),
        };
        let args = self
            .arena
            .alloc_expr_list(std::iter::once(left).chain(rest));
        self.alloc(ExprKind::Call { callee, args }, span)
    }

    /// One level of the binary operator chain.
    fn parse_binary(&mut self, level: usize) -> Result<ExprId, ParseError> {
        let Some(&matcher) = BINARY_LEVELS.get(level) else {
            return self.parse_unary();
        };
        let mut left = self.parse_binary(level + 1)?;
        while let Some(op) = matcher(self.cursor.current_kind()) {
            self.cursor.advance();
            let right = self.parse_binary(level + 1)?;
            let span = self.span_of(left).merge(self.span_of(right));
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        if let Some(op) = match_unary_op(self.cursor.current_kind()) {
            let start = self.cursor.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(self.span_of(operand));
            return Ok(self.alloc(ExprKind::Unary { op, operand }, span));
        }
        self.parse_postfix()
    }

    /// Primary followed by any number of calls and property accesses.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.cursor.eat(&TokenKind::LParen) {
                let items = self.parse_items_until(&TokenKind::RParen, "`,` or `)`")?;
                let args = self.arena.alloc_expr_list(items);
                let span = self.span_of(expr).merge(self.cursor.previous_span());
                expr = self.alloc(ExprKind::Call { callee: expr, args }, span);
            } else if self.cursor.eat(&TokenKind::Dot) {
                let key = self.parse_property_key()?;
                let span = self.span_of(expr).merge(self.span_of(key));
                expr = self.alloc(ExprKind::Property { object: expr, key }, span);
            } else {
                return Ok(expr);
            }
        }
    }

    /// Key after `.`: a name (as a string), an index, a string, or `(expr)`.
    fn parse_property_key(&mut self) -> Result<ExprId, ParseError> {
        let span = self.cursor.current_span();
        match *self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(self.alloc_name_str(name, span))
            }
            TokenKind::Int(n) => {
                self.cursor.advance();
                Ok(self.alloc(ExprKind::Int(n), span))
            }
            TokenKind::Str(_) | TokenKind::LParen => self.parse_primary(),
            _ => Err(self.cursor.unexpected("property name")),
        }
    }

    /// Comma-separated expressions up to and including `close`.
    /// Leading, trailing and repeated commas are accepted.
    pub(crate) fn parse_items_until(
        &mut self,
        close: &TokenKind,
        expected: &'static str,
    ) -> Result<Vec<ExprId>, ParseError> {
        let mut items = Vec::new();
        self.cursor.skip_commas();
        while !self.cursor.check(close) {
            items.push(self.parse_expr()?);
            if !self.cursor.check(close) {
                self.cursor.expect(&TokenKind::Comma, expected)?;
            }
            self.cursor.skip_commas();
        }
        self.cursor.advance();
        Ok(items)
    }
}
