//! Primary expressions: literals, names, groups, lists, objects, blocks,
//! function literals and `with`.

use oak_ir::{ExprId, ExprKind, FunctionDef, Name, ObjectEntry, Span};

use crate::{ParseError, ParseErrorKind, Parser, TokenKind};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let span = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(f) => ExprKind::Float(*f),
            TokenKind::Atom(name) => ExprKind::Atom(*name),
            TokenKind::Ident(name) => ExprKind::Ident(*name),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Question => ExprKind::Null,
            TokenKind::Underscore => ExprKind::Empty,
            TokenKind::Str(bytes) => ExprKind::Str(self.arena.alloc_str(bytes.clone())),
            TokenKind::LParen => return self.parse_group(),
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::LBrace => return self.parse_brace(),
            TokenKind::Fn => return self.parse_function(),
            TokenKind::If => return self.parse_if(),
            TokenKind::With => return self.parse_with(),
            _ => return Err(self.cursor.unexpected("expression")),
        };
        self.cursor.advance();
        Ok(self.alloc(kind, span))
    }

    /// A bare name used as a key, lowered to a string literal.
    pub(crate) fn alloc_name_str(&mut self, name: Name, span: Span) -> ExprId {
        let text = self.interner.lookup(name);
        let id = self.arena.alloc_str(text.as_bytes());
        self.alloc(ExprKind::Str(id), span)
    }

    /// `( ... )`: empty is `?`, one expression is itself, more form a block.
    fn parse_group(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let items = self.parse_items_until(&TokenKind::RParen, "`,` or `)`")?;
        let span = start.merge(self.cursor.previous_span());
        match items.as_slice() {
            [] => Ok(self.alloc(ExprKind::Null, span)),
            [single] => Ok(*single),
            _ => {
                let range = self.arena.alloc_expr_list(items);
                Ok(self.alloc(ExprKind::Block(range), span))
            }
        }
    }

    fn parse_list(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let items = self.parse_items_until(&TokenKind::RBracket, "`,` or `]`")?;
        let range = self.arena.alloc_expr_list(items);
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::List(range), span))
    }

    /// `{}` is an empty object; `{ key: ...` an object; anything else a block.
    fn parse_brace(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.skip_commas();
        if self.cursor.eat(&TokenKind::RBrace) {
            let span = start.merge(self.cursor.previous_span());
            let range = self.arena.alloc_entries([]);
            return Ok(self.alloc(ExprKind::Object(range), span));
        }

        let first = self.parse_expr()?;
        if self.cursor.check(&TokenKind::Colon) {
            self.parse_object_rest(start, first)
        } else {
            self.parse_block_rest(start, first)
        }
    }

    fn parse_object_rest(&mut self, start: Span, first_key: ExprId) -> Result<ExprId, ParseError> {
        let mut entries = Vec::new();
        let mut key = first_key;
        loop {
            self.cursor.expect(&TokenKind::Colon, "`:`")?;
            let value = self.parse_expr()?;
            let lowered = self.lower_key(key);
            entries.push(ObjectEntry {
                key: lowered,
                value,
            });

            if !self.cursor.check(&TokenKind::RBrace) {
                self.cursor.expect(&TokenKind::Comma, "`,` or `}`")?;
            }
            self.cursor.skip_commas();
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }
            key = self.parse_expr()?;
        }
        let range = self.arena.alloc_entries(entries);
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::Object(range), span))
    }

    /// Bare identifiers in key position name the key itself.
    fn lower_key(&mut self, key: ExprId) -> ExprId {
        match self.arena.get_expr(key).kind {
            ExprKind::Ident(name) => {
                let span = self.span_of(key);
                self.alloc_name_str(name, span)
            }
            _ => key,
        }
    }

    fn parse_block_rest(&mut self, start: Span, first: ExprId) -> Result<ExprId, ParseError> {
        let mut body = vec![first];
        loop {
            if !self.cursor.check(&TokenKind::RBrace) {
                self.cursor.expect(&TokenKind::Comma, "`,` or `}`")?;
            }
            self.cursor.skip_commas();
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }
            body.push(self.parse_expr()?);
        }
        let range = self.arena.alloc_expr_list(body);
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::Block(range), span))
    }

    /// `fn name?(params, rest...) body`. Without parentheses there are no params.
    fn parse_function(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let name = match *self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Some(name)
            }
            _ => None,
        };

        let mut params = Vec::new();
        let mut rest = None;
        if self.cursor.eat(&TokenKind::LParen) {
            self.cursor.skip_commas();
            while !self.cursor.eat(&TokenKind::RParen) {
                if rest.is_some() {
                    return Err(ParseError::new(
                        ParseErrorKind::RestNotLast,
                        self.cursor.current_span(),
                    ));
                }
                let param = match *self.cursor.current_kind() {
                    TokenKind::Ident(name) => name,
                    // An ignored parameter still occupies its position.
                    TokenKind::Underscore => self.interner.intern("_"),
                    _ => return Err(self.cursor.unexpected("parameter name")),
                };
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::Ellipsis) {
                    rest = Some(param);
                } else {
                    params.push(param);
                }
                if !self.cursor.check(&TokenKind::RParen) {
                    self.cursor.expect(&TokenKind::Comma, "`,` or `)`")?;
                }
                self.cursor.skip_commas();
            }
        }

        let body = self.parse_expr()?;
        let span = start.merge(self.span_of(body));
        let params = self.arena.alloc_params(params);
        let id = self.arena.alloc_function(FunctionDef {
            name,
            params,
            rest,
            body,
            span,
        });
        Ok(self.alloc(ExprKind::Function(id), span))
    }

    /// `with f(a) last` becomes `f(a, last)`.
    fn parse_with(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let call = self.parse_postfix()?;
        let ExprKind::Call { callee, args } = self.arena.get_expr(call).kind else {
            return Err(ParseError::new(
                ParseErrorKind::WithWithoutCall,
                self.span_of(call),
            ));
        };
        let last = self.parse_expr()?;
        let mut all = self.arena.get_expr_list(args).to_vec();
        all.push(last);
        let args = self.arena.alloc_expr_list(all);
        let span = start.merge(self.span_of(last));
        Ok(self.alloc(ExprKind::Call { callee, args }, span))
    }
}
