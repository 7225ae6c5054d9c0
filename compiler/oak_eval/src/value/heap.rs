//! Generational object heap with mark-and-sweep collection.
//!
//! Slots are reused through a free list; each reuse bumps the slot's
//! generation so a stale `Handle` is reported as `InvalidReference` instead
//! of aliasing a new object.
//!
//! # Roots
//!
//! The heap itself knows two root sets: the temporary root stack (values the
//! evaluator is holding across a sub-evaluation) and pinned values (held by
//! the embedder). Everything else (root scope, pending continuations) is
//! passed to [`Heap::collect`] by the caller.
//!
//! Collection only happens when the interpreter calls `collect`; allocation
//! never collects. Code that allocates without evaluating therefore needs no
//! rooting.

use std::fmt;

use oak_ir::{FunctionId, SharedArena};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::Value;
use crate::environment::{Scope, ScopeId};
use crate::errors::{invalid_reference, EvalError};

/// Object entries keyed by normalized key bytes.
pub type ObjectMap = FxHashMap<Vec<u8>, Value>;

/// Generational reference to a heap slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A function value: a function literal plus the scope it closed over.
#[derive(Clone, Debug)]
pub struct Closure {
    pub function: FunctionId,
    /// Arena holding the literal; outlives the parse that produced it.
    pub arena: SharedArena,
    pub scope: ScopeId,
}

/// Heap-allocated object.
#[derive(Debug)]
pub enum HeapObject {
    Str(Vec<u8>),
    List(Vec<Value>),
    Object(ObjectMap),
    Function(Closure),
    Scope(Scope),
}

impl HeapObject {
    /// Push every handle this object refers to.
    fn trace(&self, out: &mut Vec<Handle>) {
        match self {
            HeapObject::Str(_) => {}
            HeapObject::List(items) => out.extend(items.iter().filter_map(Value::handle)),
            HeapObject::Object(map) => out.extend(map.values().filter_map(Value::handle)),
            HeapObject::Function(closure) => out.push(closure.scope.handle()),
            HeapObject::Scope(scope) => scope.trace(out),
        }
    }
}

struct Slot {
    generation: u32,
    marked: bool,
    object: Option<HeapObject>,
}

/// Outcome of one collection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GcStats {
    pub live: usize,
    pub freed: usize,
}

/// The object heap.
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    roots: Vec<Handle>,
    pinned: FxHashMap<Handle, u32>,
    allocs_since_gc: usize,
    base_threshold: usize,
    threshold: usize,
}

impl Heap {
    /// Create a heap that asks for collection every `threshold` allocations.
    pub fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Heap {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            roots: Vec::new(),
            pinned: FxHashMap::default(),
            allocs_since_gc: 0,
            base_threshold: threshold,
            threshold,
        }
    }

    /// Number of live objects.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    // Allocation

    /// Allocate an object.
    pub fn alloc(&mut self, object: HeapObject) -> Handle {
        self.allocs_since_gc += 1;
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return Handle {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("heap exceeded u32::MAX slots"));
        self.slots.push(Slot {
            generation: 0,
            marked: false,
            object: Some(object),
        });
        Handle {
            index,
            generation: 0,
        }
    }

    pub fn new_str(&mut self, bytes: impl Into<Vec<u8>>) -> Value {
        Value::Str(self.alloc(HeapObject::Str(bytes.into())))
    }

    pub fn new_list(&mut self, items: Vec<Value>) -> Value {
        Value::List(self.alloc(HeapObject::List(items)))
    }

    pub fn new_object(&mut self, map: ObjectMap) -> Value {
        Value::Object(self.alloc(HeapObject::Object(map)))
    }

    pub fn new_closure(&mut self, closure: Closure) -> Value {
        Value::Function(self.alloc(HeapObject::Function(closure)))
    }

    // Access

    fn slot(&self, handle: Handle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    /// Object behind `handle`.
    pub fn get(&self, handle: Handle) -> Result<&HeapObject, EvalError> {
        self.slot(handle)
            .and_then(|slot| slot.object.as_ref())
            .ok_or_else(invalid_reference)
    }

    /// Mutable object behind `handle`.
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut HeapObject, EvalError> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.object.as_mut())
            .ok_or_else(invalid_reference)
    }

    pub fn str(&self, handle: Handle) -> Result<&[u8], EvalError> {
        match self.get(handle)? {
            HeapObject::Str(bytes) => Ok(bytes),
            _ => Err(invalid_reference()),
        }
    }

    pub fn str_mut(&mut self, handle: Handle) -> Result<&mut Vec<u8>, EvalError> {
        match self.get_mut(handle)? {
            HeapObject::Str(bytes) => Ok(bytes),
            _ => Err(invalid_reference()),
        }
    }

    pub fn list(&self, handle: Handle) -> Result<&[Value], EvalError> {
        match self.get(handle)? {
            HeapObject::List(items) => Ok(items),
            _ => Err(invalid_reference()),
        }
    }

    pub fn list_mut(&mut self, handle: Handle) -> Result<&mut Vec<Value>, EvalError> {
        match self.get_mut(handle)? {
            HeapObject::List(items) => Ok(items),
            _ => Err(invalid_reference()),
        }
    }

    pub fn object(&self, handle: Handle) -> Result<&ObjectMap, EvalError> {
        match self.get(handle)? {
            HeapObject::Object(map) => Ok(map),
            _ => Err(invalid_reference()),
        }
    }

    pub fn object_mut(&mut self, handle: Handle) -> Result<&mut ObjectMap, EvalError> {
        match self.get_mut(handle)? {
            HeapObject::Object(map) => Ok(map),
            _ => Err(invalid_reference()),
        }
    }

    pub fn closure(&self, handle: Handle) -> Result<&Closure, EvalError> {
        match self.get(handle)? {
            HeapObject::Function(closure) => Ok(closure),
            _ => Err(invalid_reference()),
        }
    }

    // Roots

    /// Keep `value` alive until the root stack is truncated below it.
    #[inline]
    pub fn push_root(&mut self, value: Value) {
        if let Some(handle) = value.handle() {
            self.roots.push(handle);
        }
    }

    /// Keep a scope alive until the root stack is truncated below it.
    #[inline]
    pub fn push_scope_root(&mut self, scope: ScopeId) {
        self.roots.push(scope.handle());
    }

    /// Current root stack height, for a later [`truncate_roots`](Self::truncate_roots).
    #[inline]
    pub fn root_mark(&self) -> usize {
        self.roots.len()
    }

    #[inline]
    pub fn truncate_roots(&mut self, mark: usize) {
        self.roots.truncate(mark);
    }

    /// Keep `value` alive across evaluations until a matching [`unpin`](Self::unpin).
    pub fn pin(&mut self, value: Value) {
        if let Some(handle) = value.handle() {
            *self.pinned.entry(handle).or_insert(0) += 1;
        }
    }

    pub fn unpin(&mut self, value: Value) {
        let Some(handle) = value.handle() else {
            return;
        };
        if let Some(count) = self.pinned.get_mut(&handle) {
            *count -= 1;
            if *count == 0 {
                self.pinned.remove(&handle);
            }
        }
    }

    // Collection

    /// Whether enough has been allocated since the last collection.
    #[inline]
    pub fn should_collect(&self) -> bool {
        self.allocs_since_gc >= self.threshold
    }

    /// Free every object not reachable from the root stack, pinned values
    /// or `extra_roots`.
    pub fn collect(&mut self, extra_roots: impl IntoIterator<Item = Handle>) -> GcStats {
        let mut worklist: Vec<Handle> = self.roots.clone();
        worklist.extend(self.pinned.keys().copied());
        worklist.extend(extra_roots);

        while let Some(handle) = worklist.pop() {
            let Some(slot) = self
                .slots
                .get_mut(handle.index as usize)
                .filter(|slot| slot.generation == handle.generation)
            else {
                continue;
            };
            if slot.marked {
                continue;
            }
            let Some(object) = slot.object.as_ref() else {
                continue;
            };
            slot.marked = true;
            object.trace(&mut worklist);
        }

        let mut freed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.marked {
                slot.marked = false;
            } else if slot.object.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                // Slot count is bounded by u32 in `alloc`.
                #[allow(clippy::cast_possible_truncation, reason = "bounded by alloc")]
                self.free.push(index as u32);
                freed += 1;
            }
        }

        self.live -= freed;
        self.allocs_since_gc = 0;
        self.threshold = self.base_threshold.max(self.live * 2);
        debug!(live = self.live, freed, next = self.threshold, "collected heap");
        GcStats {
            live: self.live,
            freed,
        }
    }
}

impl fmt::Debug for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("live", &self.live)
            .field("slots", &self.slots.len())
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}
