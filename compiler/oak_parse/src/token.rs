//! Token types produced by the lexer.

use std::fmt;

use oak_ir::{Name, Span};

/// A lexed token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals and names
    Ident(Name),
    Int(i64),
    Float(f64),
    /// Cooked string bytes (escapes resolved).
    Str(Box<[u8]>),
    Atom(Name),

    // Keywords
    Fn,
    If,
    With,
    True,
    False,

    // Value punctuation
    /// `?`
    Question,
    /// `_`
    Underscore,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// Written or inserted at a line break.
    Comma,
    Dot,
    Ellipsis,
    Colon,

    // Binding and flow
    /// `:=`
    Define,
    /// `<-`
    Nonlocal,
    /// `<<`
    Push,
    /// `|>`
    Pipe,
    /// `->`
    Arrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Amp,
    Bar,
    Caret,
    Bang,

    Eof,
}

impl TokenKind {
    /// Whether a line break after this token ends the expression,
    /// so the lexer inserts a comma there.
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Atom(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Question
                | TokenKind::Underscore
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// Whether a `:` right after this token is a key separator rather than
    /// the start of an atom.
    pub fn ends_key(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Atom(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RParen
                | TokenKind::RBracket
        )
    }

    /// Short human-readable description, for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(_) => "identifier".to_string(),
            TokenKind::Int(n) => format!("integer {n}"),
            TokenKind::Float(f) => format!("float {f}"),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::Atom(_) => "atom".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{other}`"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Ident(_) => "<ident>",
            TokenKind::Int(_) => "<int>",
            TokenKind::Float(_) => "<float>",
            TokenKind::Str(_) => "<string>",
            TokenKind::Atom(_) => "<atom>",
            TokenKind::Fn => "fn",
            TokenKind::If => "if",
            TokenKind::With => "with",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Question => "?",
            TokenKind::Underscore => "_",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Colon => ":",
            TokenKind::Define => ":=",
            TokenKind::Nonlocal => "<-",
            TokenKind::Push => "<<",
            TokenKind::Pipe => "|>",
            TokenKind::Arrow => "->",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Amp => "&",
            TokenKind::Bar => "|",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::Eof => "<eof>",
        };
        f.write_str(s)
    }
}
