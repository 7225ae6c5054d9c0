//! Scope chain.
//!
//! Scopes are heap objects so that closures can keep their defining scope
//! (and its ancestors) alive through ordinary reachability. Each scope owns
//! its bindings and holds a plain handle to its parent.
//!
//! - `:=` defines in the current scope only ([`Heap::define`]).
//! - Lookup walks current, then ancestors ([`Heap::lookup`]).
//! - `<-` rebinds the nearest existing binding and never creates one
//!   ([`Heap::assign`]).

use oak_ir::{Name, StringLookup};
use rustc_hash::FxHashMap;

use crate::errors::{invalid_reference, unbound_name, EvalError};
use crate::value::{Handle, Heap, HeapObject, Value};

/// Handle to a heap-allocated scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(Handle);

impl ScopeId {
    #[inline]
    pub(crate) const fn handle(self) -> Handle {
        self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<ScopeId>,
}

impl Scope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Binding in this scope only.
    pub fn get(&self, name: Name) -> Option<Value> {
        self.bindings.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn trace(&self, out: &mut Vec<Handle>) {
        out.extend(self.bindings.values().filter_map(Value::handle));
        if let Some(parent) = self.parent {
            out.push(parent.handle());
        }
    }
}

/// Error returned by [`Heap::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// No scope from the current one to the root binds the name.
    Undefined,
    /// A scope handle in the chain is stale.
    InvalidReference,
}

impl Heap {
    /// Allocate an empty scope.
    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        ScopeId(self.alloc(HeapObject::Scope(Scope {
            bindings: FxHashMap::default(),
            parent,
        })))
    }

    pub fn scope(&self, id: ScopeId) -> Result<&Scope, EvalError> {
        match self.get(id.0)? {
            HeapObject::Scope(scope) => Ok(scope),
            _ => Err(invalid_reference()),
        }
    }

    fn scope_mut(&mut self, id: ScopeId) -> Result<&mut Scope, EvalError> {
        match self.get_mut(id.0)? {
            HeapObject::Scope(scope) => Ok(scope),
            _ => Err(invalid_reference()),
        }
    }

    /// Bind `name` in `scope` itself, shadowing any outer binding.
    pub fn define(&mut self, scope: ScopeId, name: Name, value: Value) -> Result<(), EvalError> {
        self.scope_mut(scope)?.bindings.insert(name, value);
        Ok(())
    }

    /// Resolve `name` from `scope` outwards.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Result<Option<Value>, EvalError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(value) = scope.get(name) {
                return Ok(Some(value));
            }
            current = scope.parent;
        }
        Ok(None)
    }

    /// Rebind the nearest existing `name` from `scope` outwards.
    pub fn assign(&mut self, scope: ScopeId, name: Name, value: Value) -> Result<(), AssignError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self
                .scope_mut(id)
                .map_err(|_| AssignError::InvalidReference)?;
            if let Some(slot) = scope.bindings.get_mut(&name) {
                *slot = value;
                return Ok(());
            }
            current = scope.parent;
        }
        Err(AssignError::Undefined)
    }

    /// [`lookup`](Self::lookup), failing with `UnboundName` when absent.
    pub fn resolve(
        &self,
        scope: ScopeId,
        name: Name,
        names: &impl StringLookup,
    ) -> Result<Value, EvalError> {
        self.lookup(scope, name)?
            .ok_or_else(|| unbound_name(names.lookup(name)))
    }

    /// `name <- value`: [`assign`](Self::assign) with evaluation errors.
    pub fn assign_nonlocal(
        &mut self,
        scope: ScopeId,
        name: Name,
        value: Value,
        names: &impl StringLookup,
    ) -> Result<(), EvalError> {
        self.assign(scope, name, value).map_err(|err| match err {
            AssignError::Undefined => unbound_name(names.lookup(name)),
            AssignError::InvalidReference => invalid_reference(),
        })
    }
}
