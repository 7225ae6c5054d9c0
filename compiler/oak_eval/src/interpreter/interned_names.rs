//! Pre-interned names.
//!
//! Interned once at `Interpreter` construction so `type()` answers with a
//! `Name` copy instead of an interner lookup per call.

use oak_ir::{Name, StringInterner};

use crate::value::Value;

/// Atoms returned by `type()`.
#[derive(Clone, Copy)]
pub(crate) struct TypeNames {
    null: Name,
    empty: Name,
    bool_: Name,
    int: Name,
    float: Name,
    atom: Name,
    string: Name,
    list: Name,
    object: Name,
    function: Name,
}

impl TypeNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            null: interner.intern("null"),
            empty: interner.intern("empty"),
            bool_: interner.intern("bool"),
            int: interner.intern("int"),
            float: interner.intern("float"),
            atom: interner.intern("atom"),
            string: interner.intern("string"),
            list: interner.intern("list"),
            object: interner.intern("object"),
            function: interner.intern("function"),
        }
    }

    /// Name of `value`'s type; natives report as functions.
    pub(crate) fn of(&self, value: &Value) -> Name {
        match value {
            Value::Null => self.null,
            Value::Empty => self.empty,
            Value::Bool(_) => self.bool_,
            Value::Int(_) => self.int,
            Value::Float(_) => self.float,
            Value::Atom(_) => self.atom,
            Value::Str(_) => self.string,
            Value::List(_) => self.list,
            Value::Object(_) => self.object,
            Value::Function(_) | Value::Native(_) => self.function,
        }
    }
}
