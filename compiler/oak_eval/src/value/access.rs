//! Property access, property assignment and `<<`.

use oak_ir::StringInterner;

use super::{Heap, Value};
use crate::errors::{index_out_of_bounds, type_mismatch, EvalError, EvalResult};

/// Normalize a key for object lookup: strings by bytes, atoms by name,
/// integers by decimal text.
pub fn object_key(heap: &Heap, interner: &StringInterner, key: Value) -> Result<Vec<u8>, EvalError> {
    match key {
        Value::Str(h) => Ok(heap.str(h)?.to_vec()),
        Value::Atom(name) => Ok(interner.lookup(name).as_bytes().to_vec()),
        Value::Int(n) => Ok(n.to_string().into_bytes()),
        other => Err(type_mismatch("object key", "string, atom or int", other.type_name())),
    }
}

/// Integer index; whole floats are accepted.
#[allow(clippy::cast_possible_truncation, reason = "guarded by fract() == 0 and range check")]
fn index(key: Value, operation: &str) -> Result<i64, EvalError> {
    match key {
        Value::Int(n) => Ok(n),
        Value::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
        other => Err(type_mismatch(operation, "int index", other.type_name())),
    }
}

/// `container.key`. Missing keys and out-of-range indices give `?`.
pub fn get_property(
    heap: &mut Heap,
    interner: &StringInterner,
    container: Value,
    key: Value,
) -> EvalResult {
    match container {
        Value::Object(h) => {
            let key = object_key(heap, interner, key)?;
            Ok(heap.object(h)?.get(&key).copied().unwrap_or(Value::Null))
        }
        Value::List(h) => {
            let i = index(key, "list index")?;
            let items = heap.list(h)?;
            Ok(usize::try_from(i)
                .ok()
                .and_then(|i| items.get(i).copied())
                .unwrap_or(Value::Null))
        }
        Value::Str(h) => {
            let i = index(key, "string index")?;
            let byte = usize::try_from(i)
                .ok()
                .and_then(|i| heap.str(h).ok()?.get(i).copied());
            Ok(match byte {
                Some(b) => heap.new_str(vec![b]),
                None => Value::Null,
            })
        }
        other => Err(type_mismatch(
            "property access",
            "object, list or string",
            other.type_name(),
        )),
    }
}

/// `container.key := value`, in place. Returns the container.
///
/// Lists and strings accept indices `0..=len`; `len` appends. A string
/// value written into a string overwrites bytes from the index onward,
/// extending the target if needed.
pub fn set_property(
    heap: &mut Heap,
    interner: &StringInterner,
    container: Value,
    key: Value,
    value: Value,
) -> EvalResult {
    match container {
        Value::Object(h) => {
            let key = object_key(heap, interner, key)?;
            heap.object_mut(h)?.insert(key, value);
        }
        Value::List(h) => {
            let i = index(key, "list index")?;
            let items = heap.list_mut(h)?;
            let len = items.len();
            match usize::try_from(i) {
                Ok(i) if i < len => items[i] = value,
                Ok(i) if i == len => items.push(value),
                _ => return Err(index_out_of_bounds(i, len)),
            }
        }
        Value::Str(h) => {
            let Value::Str(source) = value else {
                return Err(type_mismatch(
                    "string assignment",
                    "string",
                    value.type_name(),
                ));
            };
            let i = index(key, "string index")?;
            let bytes = heap.str(source)?.to_vec();
            let target = heap.str_mut(h)?;
            let len = target.len();
            let start = match usize::try_from(i) {
                Ok(start) if start <= len => start,
                _ => return Err(index_out_of_bounds(i, len)),
            };
            let end = start + bytes.len();
            if end > len {
                target.resize(end, 0);
            }
            target[start..end].copy_from_slice(&bytes);
        }
        other => {
            return Err(type_mismatch(
                "property assignment",
                "object, list or string",
                other.type_name(),
            ))
        }
    }
    Ok(container)
}

/// `target << value`: append in place and return the same reference.
///
/// Lists take any value (not copied, so `l << l` makes a cycle); strings
/// take another string's bytes.
pub fn push(heap: &mut Heap, target: Value, value: Value) -> EvalResult {
    match (target, value) {
        (Value::List(h), _) => heap.list_mut(h)?.push(value),
        (Value::Str(h), Value::Str(source)) => {
            let bytes = heap.str(source)?.to_vec();
            heap.str_mut(h)?.extend_from_slice(&bytes);
        }
        (Value::Str(_), other) => {
            return Err(type_mismatch("<<", "string", other.type_name()));
        }
        (other, _) => return Err(type_mismatch("<<", "string or list", other.type_name())),
    }
    Ok(target)
}
