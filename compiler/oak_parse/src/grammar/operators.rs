//! Operator matching helpers, one per binary precedence level.

use oak_ir::{BinaryOp, UnaryOp};

use crate::TokenKind;

/// Matcher for one binary precedence level.
pub(super) type LevelMatcher = fn(&TokenKind) -> Option<BinaryOp>;

/// Binary levels from loosest to tightest. All are left associative.
pub(super) static BINARY_LEVELS: [LevelMatcher; 6] = [
    match_or_op,
    match_xor_op,
    match_and_op,
    match_comparison_op,
    match_additive_op,
    match_multiplicative_op,
];

fn match_or_op(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::Bar).then_some(BinaryOp::Or)
}

fn match_xor_op(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::Caret).then_some(BinaryOp::Xor)
}

fn match_and_op(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::Amp).then_some(BinaryOp::And)
}

fn match_comparison_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn match_additive_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn match_multiplicative_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        _ => None,
    }
}

pub(super) fn match_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Bang => Some(UnaryOp::Not),
        _ => None,
    }
}
