//! Unary operator implementations for the evaluator.

use oak_ir::UnaryOp;

use crate::errors::{integer_overflow, type_mismatch, EvalResult};
use crate::value::Value;

/// Evaluate `op value`.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        (_, UnaryOp::Neg) => Err(type_mismatch("-", "number", value.type_name())),
        (_, UnaryOp::Not) => Err(type_mismatch("!", "bool", value.type_name())),
    }
}
