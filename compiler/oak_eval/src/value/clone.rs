//! Deep copy of mutable values.

use oak_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::{Handle, Heap, HeapObject, Value};
use crate::errors::EvalResult;

/// Copy every string, list and object reachable from `value`.
///
/// Sharing and cycles inside the copied graph are preserved: an object
/// reached twice is copied once. Primitives, atoms and functions are
/// returned as-is.
pub fn deep_clone(heap: &mut Heap, value: Value) -> EvalResult {
    let mut copies = FxHashMap::default();
    clone_value(heap, value, &mut copies)
}

fn clone_value(heap: &mut Heap, value: Value, copies: &mut FxHashMap<Handle, Value>) -> EvalResult {
    if let Some(&copy) = value.handle().and_then(|h| copies.get(&h)) {
        return Ok(copy);
    }
    match value {
        Value::Str(h) => {
            let bytes = heap.str(h)?.to_vec();
            let copy = heap.new_str(bytes);
            copies.insert(h, copy);
            Ok(copy)
        }
        Value::List(h) => {
            let items = heap.list(h)?.to_vec();
            let target = heap.alloc(HeapObject::List(Vec::with_capacity(items.len())));
            copies.insert(h, Value::List(target));
            for item in items {
                let item = ensure_sufficient_stack(|| clone_value(heap, item, copies))?;
                heap.list_mut(target)?.push(item);
            }
            Ok(Value::List(target))
        }
        Value::Object(h) => {
            let entries: Vec<(Vec<u8>, Value)> = heap
                .object(h)?
                .iter()
                .map(|(key, value)| (key.clone(), *value))
                .collect();
            let target = heap.alloc(HeapObject::Object(FxHashMap::default()));
            copies.insert(h, Value::Object(target));
            for (key, item) in entries {
                let item = ensure_sufficient_stack(|| clone_value(heap, item, copies))?;
                heap.object_mut(target)?.insert(key, item);
            }
            Ok(Value::Object(target))
        }
        _ => Ok(value),
    }
}
