//! Lexer.
//!
//! Produces a flat token list. Two pieces of context sensitivity live here
//! rather than in the parser:
//!
//! - A line break after a token that can end an expression becomes a comma,
//!   unless the next line starts with `|>` (a continued pipeline).
//! - `:name` is an atom unless the previous token can end an object key, in
//!   which case the `:` is a key separator.

use memchr::{memchr, memchr2};
use oak_ir::{Span, StringInterner};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::token::{Token, TokenKind};

/// Lex `source` into tokens. The list always ends with `Eof`.
pub fn lex(source: &str, interner: &StringInterner) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(source, interner);
    lexer.run()?;
    trace!(tokens = lexer.tokens.len(), "lexed");
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    interner: &'a StringInterner,
    pos: usize,
    tokens: Vec<Token>,
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'?' || b == b'!'
}

fn keyword(ident: &str) -> Option<TokenKind> {
    Some(match ident {
        "fn" => TokenKind::Fn,
        "if" => TokenKind::If,
        "with" => TokenKind::With,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "_" => TokenKind::Underscore,
        _ => return None,
    })
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            interner,
            pos: 0,
            tokens: Vec::with_capacity(source.len() / 4),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn last_kind(&self) -> Option<&TokenKind> {
        self.tokens.last().map(|t| &t.kind)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens
            .push(Token::new(kind, Span::from_range(start..self.pos)));
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => self.newline(),
                b'/' if self.peek_at(1) == Some(b'/') => self.skip_comment(),
                b'0'..=b'9' => self.number()?,
                b'\'' | b'"' => self.string(b)?,
                b if is_ident_start(b) => self.ident(),
                _ => self.punct()?,
            }
        }
        self.push(TokenKind::Eof, self.pos);
        Ok(())
    }

    fn newline(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let ends = self.last_kind().is_some_and(TokenKind::ends_expression);
        if ends && !self.next_line_continues() {
            self.tokens
                .push(Token::new(TokenKind::Comma, Span::from_range(start..start + 1)));
        }
    }

    /// Whether the next non-blank text is `|>`.
    fn next_line_continues(&self) -> bool {
        let rest = &self.bytes[self.pos..];
        let skip = rest
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(rest.len());
        rest[skip..].starts_with(b"|>")
    }

    fn skip_comment(&mut self) {
        // Leave the newline itself for `newline` so comma insertion still applies.
        match memchr(b'\n', &self.bytes[self.pos..]) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.bytes.len(),
        }
    }

    fn number(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.eat_digits();

        // `list.0.1` indexes twice; only a number outside property position
        // takes a fractional part.
        let after_dot = matches!(self.last_kind(), Some(TokenKind::Dot));
        let is_float = !after_dot
            && self.peek() == Some(b'.')
            && self.peek_at(1).is_some_and(|b| b.is_ascii_digit());
        if is_float {
            self.pos += 1;
            self.eat_digits();
        }

        let text = &self.source[start..self.pos];
        let kind = if is_float {
            text.parse::<f64>().map(TokenKind::Float).ok()
        } else {
            text.parse::<i64>().map(TokenKind::Int).ok()
        };
        match kind {
            Some(kind) => {
                self.push(kind, start);
                Ok(())
            }
            None => Err(ParseError::new(
                ParseErrorKind::InvalidNumber(text.to_string()),
                Span::from_range(start..self.pos),
            )),
        }
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn eat_ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            // `a!=b` compares; it does not name `a!`.
            if !is_ident_continue(b) || (b == b'!' && self.peek_at(1) == Some(b'=')) {
                break;
            }
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    fn ident(&mut self) {
        let start = self.pos;
        let text = self.eat_ident();
        let kind = keyword(text).unwrap_or_else(|| TokenKind::Ident(self.interner.intern(text)));
        self.push(kind, start);
    }

    fn string(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut cooked = Vec::new();
        loop {
            let rest = &self.bytes[self.pos..];
            let Some(offset) = memchr2(quote, b'\\', rest) else {
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedString,
                    Span::from_range(start..self.bytes.len()),
                ));
            };
            cooked.extend_from_slice(&rest[..offset]);
            self.pos += offset;
            if self.bytes[self.pos] == quote {
                self.pos += 1;
                break;
            }
            self.escape(&mut cooked);
        }
        self.push(TokenKind::Str(cooked.into_boxed_slice()), start);
        Ok(())
    }

    /// Cook the escape at `pos` (which is a backslash) into `out`.
    fn escape(&mut self, out: &mut Vec<u8>) {
        self.pos += 1;
        let Some(b) = self.peek() else {
            // Trailing backslash; the unterminated string is reported by the caller.
            return;
        };
        self.pos += 1;
        match b {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b'f' => out.push(0x0c),
            b'x' => {
                let hex = self.bytes.get(self.pos..self.pos + 2);
                let value = hex
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match value {
                    Some(v) => {
                        out.push(v);
                        self.pos += 2;
                    }
                    None => out.push(b'x'),
                }
            }
            // Any other escaped byte stands for itself: \\ \' \" and so on.
            other => out.push(other),
        }
    }

    fn punct(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let b = self.bytes[self.pos];
        let next = self.peek_at(1);
        let (kind, width) = match (b, next) {
            (b':', Some(b'=')) => (TokenKind::Define, 2),
            (b':', Some(n)) if is_ident_start(n) && !self.last_kind().is_some_and(TokenKind::ends_key) => {
                self.pos += 1;
                let name = self.eat_ident();
                let atom = self.interner.intern(name);
                self.push(TokenKind::Atom(atom), start);
                return Ok(());
            }
            (b':', _) => (TokenKind::Colon, 1),
            (b'.', Some(b'.')) if self.peek_at(2) == Some(b'.') => (TokenKind::Ellipsis, 3),
            (b'.', _) => (TokenKind::Dot, 1),
            (b'<', Some(b'-')) => (TokenKind::Nonlocal, 2),
            (b'<', Some(b'<')) => (TokenKind::Push, 2),
            (b'<', Some(b'=')) => (TokenKind::LtEq, 2),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', Some(b'=')) => (TokenKind::GtEq, 2),
            (b'>', _) => (TokenKind::Gt, 1),
            (b'-', Some(b'>')) => (TokenKind::Arrow, 2),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'|', Some(b'>')) => (TokenKind::Pipe, 2),
            (b'|', _) => (TokenKind::Bar, 1),
            (b'!', Some(b'=')) => (TokenKind::NotEq, 2),
            (b'!', _) => (TokenKind::Bang, 1),
            (b'=', _) => (TokenKind::Eq, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'&', _) => (TokenKind::Amp, 1),
            (b'^', _) => (TokenKind::Caret, 1),
            (b'?', _) => (TokenKind::Question, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b'[', _) => (TokenKind::LBracket, 1),
            (b']', _) => (TokenKind::RBracket, 1),
            (b'{', _) => (TokenKind::LBrace, 1),
            (b'}', _) => (TokenKind::RBrace, 1),
            (b',', _) => (TokenKind::Comma, 1),
            _ => {
                let ch = self.source[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedChar(ch),
                    Span::from_range(start..start + ch.len_utf8()),
                ));
            }
        };
        self.pos += width;
        self.push(kind, start);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
