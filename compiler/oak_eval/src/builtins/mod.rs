//! Built-in functions registered into the root scope.
//!
//! Natives receive their arguments unchecked; a missing argument reads as
//! `?`, matching how user functions bind parameters.

mod host;

use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{deep_clone, DisplayMode, Value};

/// Register the standard built-ins.
///
/// Includes:
/// - Output: `print`, `println`
/// - Conversions: `string`, `int`, `float`, `atom`, `char`, `codepoint`
/// - Introspection: `type`, `len`, `keys`
/// - Copying: `clone`, `slice`
/// - Host operations: `wait`, `readFile`, `writeFile`
pub fn register_prelude(interpreter: &mut Interpreter) -> Result<(), EvalError> {
    interpreter.register_native("print", builtin_print)?;
    interpreter.register_native("println", builtin_println)?;

    interpreter.register_native("string", builtin_string)?;
    interpreter.register_native("int", builtin_int)?;
    interpreter.register_native("float", builtin_float)?;
    interpreter.register_native("atom", builtin_atom)?;
    interpreter.register_native("char", builtin_char)?;
    interpreter.register_native("codepoint", builtin_codepoint)?;

    interpreter.register_native("type", builtin_type)?;
    interpreter.register_native("len", builtin_len)?;
    interpreter.register_native("keys", builtin_keys)?;

    interpreter.register_native("clone", builtin_clone)?;
    interpreter.register_native("slice", builtin_slice)?;

    host::register(interpreter)
}

/// Argument `i`, or `?` when the caller passed fewer.
#[inline]
fn arg(args: &[Value], i: usize) -> Value {
    args.get(i).copied().unwrap_or(Value::Null)
}

/// Length as an Oak integer.
#[inline]
fn int_len(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

// Output

fn builtin_print(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let bytes = interp.display_bytes(arg(args, 0), DisplayMode::Plain)?;
    interp.print_handler.print(&bytes);
    Ok(Value::Null)
}

fn builtin_println(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let bytes = interp.display_bytes(arg(args, 0), DisplayMode::Plain)?;
    interp.print_handler.println(&bytes);
    Ok(Value::Null)
}

// Conversions

/// `string(v)`: a new string holding the plain rendering of `v`.
fn builtin_string(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let bytes = interp.display_bytes(arg(args, 0), DisplayMode::Plain)?;
    Ok(interp.heap.new_str(bytes))
}

/// `int(v)`: floats truncate toward zero; strings parse as decimal.
/// Anything unconvertible gives `?`.
fn builtin_int(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(match arg(args, 0) {
        Value::Int(n) => Value::Int(n),
        Value::Float(f) => float_to_int(f).map_or(Value::Null, Value::Int),
        Value::Str(h) => {
            let text = String::from_utf8_lossy(interp.heap.str(h)?);
            let text = text.trim();
            match text.parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => text
                    .parse::<f64>()
                    .ok()
                    .and_then(float_to_int)
                    .map_or(Value::Null, Value::Int),
            }
        }
        _ => Value::Null,
    })
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "bounds checked against 2^63 before the cast"
)]
fn float_to_int(f: f64) -> Option<i64> {
    // 2^63 is exact in f64; the valid range is -2^63 <= t < 2^63.
    let two_pow_63 = 2.0_f64.powi(63);
    let truncated = f.trunc();
    (truncated.is_finite() && truncated >= -two_pow_63 && truncated < two_pow_63)
        .then(|| truncated as i64)
}

/// `float(v)`: numbers widen, strings parse; anything else gives `?`.
fn builtin_float(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let value = arg(args, 0);
    if let Some(f) = value.as_f64() {
        return Ok(Value::Float(f));
    }
    Ok(match value {
        Value::Str(h) => String::from_utf8_lossy(interp.heap.str(h)?)
            .trim()
            .parse::<f64>()
            .map_or(Value::Null, Value::Float),
        _ => Value::Null,
    })
}

/// `atom(v)`: strings by content, atoms unchanged, anything else by its
/// plain rendering.
fn builtin_atom(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let name = match arg(args, 0) {
        Value::Atom(name) => name,
        Value::Str(h) => interp.interner.intern_bytes(interp.heap.str(h)?),
        other => {
            let bytes = interp.display_bytes(other, DisplayMode::Plain)?;
            interp.interner.intern_bytes(&bytes)
        }
    };
    Ok(Value::Atom(name))
}

/// `char(n)`: one-byte string for `n` in `0..=255`.
fn builtin_char(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    match arg(args, 0) {
        Value::Int(n) => match u8::try_from(n) {
            Ok(byte) => Ok(interp.heap.new_str(vec![byte])),
            Err(_) => Err(type_mismatch("char", "int in 0..=255", &n.to_string())),
        },
        other => Err(type_mismatch("char", "int", other.type_name())),
    }
}

/// `codepoint(s)`: first byte of `s`, or `?` for the empty string.
fn builtin_codepoint(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    match arg(args, 0) {
        Value::Str(h) => Ok(interp
            .heap
            .str(h)?
            .first()
            .map_or(Value::Null, |&b| Value::Int(i64::from(b)))),
        other => Err(type_mismatch("codepoint", "string", other.type_name())),
    }
}

// Introspection

fn builtin_type(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Atom(interp.type_names.of(&arg(args, 0))))
}

fn builtin_len(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    match arg(args, 0) {
        Value::Str(h) => Ok(int_len(interp.heap.str(h)?.len())),
        Value::List(h) => Ok(int_len(interp.heap.list(h)?.len())),
        Value::Object(h) => Ok(int_len(interp.heap.object(h)?.len())),
        other => Err(type_mismatch("len", "string, list or object", other.type_name())),
    }
}

/// `keys(o)`: a list of new strings, sorted bytewise.
fn builtin_keys(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let Value::Object(h) = arg(args, 0) else {
        return Err(type_mismatch("keys", "object", arg(args, 0).type_name()));
    };
    let mut keys: Vec<Vec<u8>> = interp.heap.object(h)?.keys().cloned().collect();
    keys.sort_unstable();
    let items = keys
        .into_iter()
        .map(|key| interp.heap.new_str(key))
        .collect();
    Ok(interp.heap.new_list(items))
}

// Copying

fn builtin_clone(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    deep_clone(&mut interp.heap, arg(args, 0))
}

/// `slice(v, start, end?)`: sub-list or sub-string. Bounds clamp to
/// `0..=len`; a missing end means `len`; `start > end` gives an empty result.
/// List elements are shared with the source, not copied.
fn builtin_slice(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let target = arg(args, 0);
    let len = match target {
        Value::Str(h) => interp.heap.str(h)?.len(),
        Value::List(h) => interp.heap.list(h)?.len(),
        other => return Err(type_mismatch("slice", "string or list", other.type_name())),
    };
    let start = clamp_bound(arg(args, 1), 0, len)?;
    let end = clamp_bound(arg(args, 2), len, len)?.max(start);

    match target {
        Value::Str(h) => {
            let bytes = interp.heap.str(h)?[start..end].to_vec();
            Ok(interp.heap.new_str(bytes))
        }
        Value::List(h) => {
            let items = interp.heap.list(h)?[start..end].to_vec();
            Ok(interp.heap.new_list(items))
        }
        other => Err(type_mismatch("slice", "string or list", other.type_name())),
    }
}

/// Slice bound clamped to `0..=len`; `?` selects `default`.
fn clamp_bound(bound: Value, default: usize, len: usize) -> Result<usize, EvalError> {
    match bound {
        Value::Null => Ok(default),
        Value::Int(n) if n <= 0 => Ok(0),
        Value::Int(n) => Ok(usize::try_from(n).map_or(len, |n| n.min(len))),
        other => Err(type_mismatch("slice", "int bound", other.type_name())),
    }
}

#[cfg(test)]
mod tests;
