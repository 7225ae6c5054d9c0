//! Text rendering of values, used by `string()`, `print()` and the CLI.

use oak_ir::StringLookup;
use oak_stack::ensure_sufficient_stack;

use super::{Handle, Heap, Value};
use crate::errors::EvalError;

/// How the outermost value is rendered.
///
/// Values nested inside lists and objects always use the `Debug` form, so
/// `string(['a'])` is `['a']` while `string('a')` is `a`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Strings raw, atoms by name.
    Plain,
    /// Strings single-quoted, atoms prefixed with `:`.
    Debug,
}

/// Render `value` as bytes.
///
/// Object keys are sorted. A container met again while it is still being
/// rendered prints as `[...]` or `{...}`.
pub fn display_bytes(
    heap: &Heap,
    names: &impl StringLookup,
    value: Value,
    mode: DisplayMode,
) -> Result<Vec<u8>, EvalError> {
    let mut renderer = Renderer {
        heap,
        names,
        out: Vec::new(),
        open: Vec::new(),
    };
    renderer.value(value, mode)?;
    Ok(renderer.out)
}

/// [`display_bytes`], with invalid UTF-8 replaced.
pub fn display_string(
    heap: &Heap,
    names: &impl StringLookup,
    value: Value,
    mode: DisplayMode,
) -> Result<String, EvalError> {
    let bytes = display_bytes(heap, names, value, mode)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

struct Renderer<'a, L: StringLookup> {
    heap: &'a Heap,
    names: &'a L,
    out: Vec<u8>,
    /// Containers currently being rendered.
    open: Vec<Handle>,
}

impl<L: StringLookup> Renderer<'_, L> {
    fn text(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    fn value(&mut self, value: Value, mode: DisplayMode) -> Result<(), EvalError> {
        match value {
            Value::Null => self.text("?"),
            Value::Empty => self.text("_"),
            Value::Bool(b) => self.text(if b { "true" } else { "false" }),
            Value::Int(n) => self.text(&n.to_string()),
            Value::Float(f) => match mode {
                DisplayMode::Plain => self.text(&f.to_string()),
                DisplayMode::Debug => self.text(&format!("{f:?}")),
            },
            Value::Atom(name) => {
                if mode == DisplayMode::Debug {
                    self.text(":");
                }
                let text = self.names.lookup(name).to_owned();
                self.text(&text);
            }
            Value::Str(h) => {
                let heap = self.heap;
                let bytes = heap.str(h)?;
                match mode {
                    DisplayMode::Plain => self.out.extend_from_slice(bytes),
                    DisplayMode::Debug => quote(&mut self.out, bytes),
                }
            }
            Value::List(h) => self.list(h)?,
            Value::Object(h) => self.object(h)?,
            Value::Function(h) => {
                let heap = self.heap;
                let closure = heap.closure(h)?;
                let def = closure.arena.get_function(closure.function);
                let mut params: Vec<String> = closure
                    .arena
                    .get_params(def.params)
                    .iter()
                    .map(|&p| self.names.lookup(p).to_owned())
                    .collect();
                if let Some(rest) = def.rest {
                    params.push(format!("{}...", self.names.lookup(rest)));
                }
                self.text(&format!("fn({})", params.join(", ")));
            }
            Value::Native(_) => self.text("fn(...)"),
        }
        Ok(())
    }

    fn list(&mut self, h: Handle) -> Result<(), EvalError> {
        if self.open.contains(&h) {
            self.text("[...]");
            return Ok(());
        }
        self.open.push(h);
        let heap = self.heap;
        self.text("[");
        let items = heap.list(h)?;
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            ensure_sufficient_stack(|| self.value(item, DisplayMode::Debug))?;
        }
        self.text("]");
        self.open.pop();
        Ok(())
    }

    fn object(&mut self, h: Handle) -> Result<(), EvalError> {
        if self.open.contains(&h) {
            self.text("{...}");
            return Ok(());
        }
        self.open.push(h);
        let heap = self.heap;
        let mut entries: Vec<(&[u8], Value)> = heap
            .object(h)?
            .iter()
            .map(|(key, &value)| (key.as_slice(), value))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        self.text("{");
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            self.out.extend_from_slice(key);
            self.text(": ");
            ensure_sufficient_stack(|| self.value(value, DisplayMode::Debug))?;
        }
        self.text("}");
        self.open.pop();
        Ok(())
    }
}

/// Oak string literal syntax: single quotes, escaped quote, backslash and
/// control characters.
fn quote(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(b'\'');
    for &b in bytes {
        match b {
            b'\'' => out.extend_from_slice(b"\\'"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out.push(b'\'');
}
