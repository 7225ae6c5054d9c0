//! Structural equality (`=`).

use oak_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use super::{Handle, Heap, Value};
use crate::errors::EvalError;

/// Deep equality.
///
/// `_` equals everything on either side. Integers and floats compare by
/// numeric value. Strings compare bytewise, lists element-wise and objects
/// by key set and values. Functions compare by identity. A pair of
/// containers already under comparison is assumed equal, so cyclic values
/// terminate.
pub fn equals(heap: &Heap, a: Value, b: Value) -> Result<bool, EvalError> {
    let mut visiting = FxHashSet::default();
    equals_inner(heap, a, b, &mut visiting)
}

#[allow(clippy::float_cmp, reason = "Oak `=` is exact numeric comparison")]
fn equals_inner(
    heap: &Heap,
    a: Value,
    b: Value,
    visiting: &mut FxHashSet<(Handle, Handle)>,
) -> Result<bool, EvalError> {
    match (a, b) {
        (Value::Empty, _) | (_, Value::Empty) => Ok(true),
        (Value::Null, Value::Null) => Ok(true),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            Ok(a.as_f64() == b.as_f64())
        }
        (Value::Atom(x), Value::Atom(y)) => Ok(x == y),
        (Value::Str(x), Value::Str(y)) => Ok(x == y || heap.str(x)? == heap.str(y)?),
        (Value::List(x), Value::List(y)) => {
            if x == y || !visiting.insert((x, y)) {
                return Ok(true);
            }
            let (xs, ys) = (heap.list(x)?, heap.list(y)?);
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (&l, &r) in xs.iter().zip(ys) {
                if !ensure_sufficient_stack(|| equals_inner(heap, l, r, visiting))? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Object(x), Value::Object(y)) => {
            if x == y || !visiting.insert((x, y)) {
                return Ok(true);
            }
            let (xs, ys) = (heap.object(x)?, heap.object(y)?);
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (key, &l) in xs {
                let Some(&r) = ys.get(key) else {
                    return Ok(false);
                };
                if !ensure_sufficient_stack(|| equals_inner(heap, l, r, visiting))? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Function(x), Value::Function(y)) => Ok(x == y),
        (Value::Native(x), Value::Native(y)) => Ok(x == y),
        _ => Ok(false),
    }
}
