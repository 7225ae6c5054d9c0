//! Binary operator implementations for the evaluator.
//!
//! Direct enum dispatch over the closed `Value` set. Both operands are
//! already evaluated; Oak has no short-circuiting operators.

use std::cmp::Ordering;

use oak_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, division_by_zero, integer_overflow, EvalResult};
use crate::value::{equals, Heap, Value};

/// Checked integer arithmetic; `None` is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right`.
///
/// `=` and `!=` accept any pair and compare structurally. Allocates only
/// for string concatenation.
pub fn evaluate_binary(heap: &mut Heap, left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return equals(heap, left, right).map(Value::Bool),
        BinaryOp::NotEq => return equals(heap, left, right).map(|eq| Value::Bool(!eq)),
        _ => {}
    }
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(a, b, op, left, right),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => eval_float_binary(a, b, op, left, right),
                _ => Err(binary_type_mismatch(op.as_symbol(), "numbers", &left, &right)),
            }
        }
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(a, b, op, left, right),
        (Value::Str(a), Value::Str(b)) => {
            if op == BinaryOp::Add {
                let mut joined = heap.str(a)?.to_vec();
                joined.extend_from_slice(heap.str(b)?);
                return Ok(heap.new_str(joined));
            }
            let ordering = heap.str(a)?.cmp(heap.str(b)?);
            compare(Some(ordering), op, left, right)
        }
        _ => Err(binary_type_mismatch(
            op.as_symbol(),
            expected_for(op),
            &left,
            &right,
        )),
    }
}

fn expected_for(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "numbers or strings",
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => "numbers",
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => "bools or ints",
        _ => "numbers or strings",
    }
}

/// Integer pairs stay integers, except `/` that does not divide exactly.
#[allow(clippy::cast_precision_loss, reason = "inexact division widens to float")]
fn eval_int_binary(a: i64, b: i64, op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            match a.checked_rem(b) {
                Some(0) => checked_arith(a.checked_div(b), "division"),
                Some(_) => Ok(Value::Float(a as f64 / b as f64)),
                None => Err(integer_overflow("division")),
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(division_by_zero());
            }
            checked_arith(a.checked_rem(b), "remainder")
        }
        BinaryOp::And => Ok(Value::Int(a & b)),
        BinaryOp::Or => Ok(Value::Int(a | b)),
        BinaryOp::Xor => Ok(Value::Int(a ^ b)),
        _ => compare(Some(a.cmp(&b)), op, left, right),
    }
}

/// Float arithmetic follows IEEE 754, including division by zero.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        // NaN is unordered: every ordering comparison is false.
        _ => compare(a.partial_cmp(&b), op, left, right),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match op {
        BinaryOp::And => Ok(Value::Bool(a & b)),
        BinaryOp::Or => Ok(Value::Bool(a | b)),
        BinaryOp::Xor => Ok(Value::Bool(a ^ b)),
        _ => Err(binary_type_mismatch(
            op.as_symbol(),
            expected_for(op),
            &left,
            &right,
        )),
    }
}

/// `< <= > >=` given an ordering of the operands.
fn compare(ordering: Option<Ordering>, op: BinaryOp, left: Value, right: Value) -> EvalResult {
    let result = match op {
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => {
            return Err(binary_type_mismatch(
                op.as_symbol(),
                expected_for(op),
                &left,
                &right,
            ))
        }
    };
    Ok(Value::Bool(result))
}

#[cfg(test)]
mod tests;
