//! Runtime values.
//!
//! `Value` is a small `Copy` enum. Primitives and atoms are stored inline;
//! strings, lists, objects and closures live in the [`Heap`] and are referred
//! to by generational [`Handle`]. Derived `PartialEq` on `Value` is identity
//! (same handle); Oak's `=` is [`equals`], which compares structure.

mod access;
mod clone;
mod display;
mod equality;
mod heap;

pub use access::{get_property, object_key, push, set_property};
pub use clone::deep_clone;
pub use display::{display_bytes, display_string, DisplayMode};
pub use equality::equals;
pub use heap::{Closure, GcStats, Handle, Heap, HeapObject, ObjectMap};

use oak_ir::Name;

/// Index into the interpreter's native function table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NativeId(u32);

impl NativeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NativeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An Oak value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    /// `?`
    Null,
    /// `_`: equal to every value.
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Atom(Name),
    /// Mutable byte buffer.
    Str(Handle),
    List(Handle),
    Object(Handle),
    /// Closure over a defining scope.
    Function(Handle),
    /// Host-provided built-in. Reports as `:function`.
    Native(NativeId),
}

impl Value {
    /// Name used by `type()` and in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Empty => "empty",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Atom(_) => "atom",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Native(_) => "function",
        }
    }

    /// Heap handle, for heap-allocated variants.
    #[inline]
    pub const fn handle(&self) -> Option<Handle> {
        match self {
            Value::Str(h) | Value::List(h) | Value::Object(h) | Value::Function(h) => Some(*h),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Native(_))
    }

    /// Numeric view for mixed int/float arithmetic.
    #[inline]
    #[allow(clippy::cast_precision_loss, reason = "int to float widening is Oak semantics")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
