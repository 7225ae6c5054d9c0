//! Expression, pattern and operator node types.
//!
//! Oak has no statements: a program is a sequence of expressions, a block is a
//! sequence of expressions, and the only conditional is the match expression.

use crate::{
    ClauseRange, EntryRange, ExprId, ExprRange, FunctionId, Name, ParamRange, PatternEntryRange,
    PatternId, PatternRange, Span, StrId,
};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// `?`
    Null,
    /// `_`
    Empty,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal; bytes live in the arena's string table.
    Str(StrId),
    /// Atom literal `:name`.
    Atom(Name),
    /// Variable reference.
    Ident(Name),
    /// `[a, b, c]`
    List(ExprRange),
    /// `{ key: value, ... }`
    Object(EntryRange),
    /// `{ a, b, c }` - evaluated in a fresh child scope, value of the last.
    Block(ExprRange),
    /// `fn name(params) body`
    Function(FunctionId),
    /// `callee(args)`
    Call { callee: ExprId, args: ExprRange },
    /// `if subjects { patterns -> body, ... }`
    ///
    /// Each clause carries exactly one pattern per subject.
    Match {
        subjects: ExprRange,
        clauses: ClauseRange,
    },
    /// Prefix operator.
    Unary { op: UnaryOp, operand: ExprId },
    /// Infix operator.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `target := value`; target is an `Ident` or a `Property`.
    Define { target: ExprId, value: ExprId },
    /// `name <- value`
    Assign { name: Name, value: ExprId },
    /// `target << value`
    Push { target: ExprId, value: ExprId },
    /// `object.key`; the key is an expression (`.name` lowers to a string literal).
    Property { object: ExprId, key: ExprId },
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnaryOp {
    /// Source symbol, for error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

/// Infix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical on bools, bitwise on ints
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// Source symbol, for error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
        }
    }
}

/// Function literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    /// `fn name(...)` also defines `name` in the enclosing scope.
    pub name: Option<Name>,
    pub params: ParamRange,
    /// Trailing `rest...` parameter collecting surplus arguments.
    pub rest: Option<Name>,
    pub body: ExprId,
    pub span: Span,
}

/// One `key: value` entry of an object literal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObjectEntry {
    /// Key expression; bare identifiers lower to string literals.
    pub key: ExprId,
    pub value: ExprId,
}

/// Match clause: one pattern per subject, and the body run on success.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clause {
    pub patterns: PatternRange,
    pub body: ExprId,
}

/// Match pattern.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Any other expression: evaluated, then compared by deep equality.
    Expr(ExprId),
    /// `_`, or `name := _` when `bind` is set.
    Empty { bind: Option<Name> },
    /// `name := pattern`: binds the whole subject when `pattern` matches.
    Bind { name: Name, pattern: PatternId },
    /// `[p1, p2, ...]`: a list of exactly this length.
    List(PatternRange),
    /// `{ k: p, ... }`: an object holding at least these keys.
    Object(PatternEntryRange),
}

/// One `key: pattern` entry of an object pattern.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatternEntry {
    pub key: StrId,
    pub pattern: PatternId,
}
