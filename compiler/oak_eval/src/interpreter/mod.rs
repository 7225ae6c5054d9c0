//! Tree-walking interpreter.
//!
//! One `Interpreter` owns the heap, the root scope, the native function
//! table and the scheduler. Programs and callbacks are evaluated on the
//! thread that owns it.
//!
//! # Rooting
//!
//! The collector runs only at call entry and at event-loop idle points.
//! Every node that evaluates more than one subexpression pushes each
//! intermediate result on the heap root stack and truncates back to its
//! entry mark before returning. A returned value is unrooted; its consumer
//! roots it if it evaluates anything else first.

mod builder;
mod eval;
mod event_loop;
mod function_call;
mod interned_names;

use std::rc::Rc;

use oak_ir::{Name, Program, SharedInterner};
use tracing::debug;

pub use builder::InterpreterBuilder;
pub(crate) use interned_names::TypeNames;

use crate::config::InterpreterConfig;
use crate::environment::ScopeId;
use crate::errors::EvalResult;
use crate::print_handler::SharedPrintHandler;
use crate::scheduler::{CompletionSender, OperationId, Scheduler};
use crate::value::{display_bytes, display_string, DisplayMode, GcStats, Heap, NativeId, Value};
use crate::EvalError;

/// A host function callable from Oak.
///
/// Receives the arguments exactly as passed; arity is the native's own
/// business.
pub type NativeFn = Rc<dyn Fn(&mut Interpreter, &[Value]) -> EvalResult>;

struct NativeEntry {
    name: Name,
    func: NativeFn,
}

/// What evaluating a whole program produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramOutcome {
    /// Value of the last top-level statement; `?` for an empty program or
    /// when that statement failed.
    pub value: Value,
    /// Errors of aborted top-level statements, in source order.
    pub errors: Vec<EvalError>,
}

impl ProgramOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The final value, or the first statement error.
    pub fn into_result(self) -> EvalResult {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

impl Default for ProgramOutcome {
    fn default() -> Self {
        ProgramOutcome {
            value: Value::Null,
            errors: Vec::new(),
        }
    }
}

/// The Oak interpreter.
pub struct Interpreter {
    pub(crate) heap: Heap,
    pub(crate) interner: SharedInterner,
    /// Root scope: built-ins and top-level definitions.
    pub(crate) root: ScopeId,
    natives: Vec<NativeEntry>,
    pub(crate) scheduler: Scheduler,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) config: InterpreterConfig,
    pub(crate) type_names: TypeNames,
    /// Non-tail calls currently on the Rust stack.
    pub(crate) call_depth: usize,
}

impl Interpreter {
    /// Interpreter with default configuration, stdout output and the
    /// built-in library.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Evaluate a parsed program in the root scope, one top-level
    /// statement at a time.
    ///
    /// A statement that fails is abandoned and its error recorded; the
    /// statements after it still run, and callbacks it registered before
    /// failing stay pending for [`run_event_loop`](Self::run_event_loop).
    ///
    /// The outcome's value is not rooted; [`pin`](Self::pin) it to keep it
    /// across further evaluation.
    pub fn eval_program(&mut self, program: &Program) -> ProgramOutcome {
        let base = self.heap.root_mark();
        let mut outcome = ProgramOutcome::default();
        for &expr in &program.body {
            match self.eval(&program.arena, expr, self.root) {
                Ok(value) => outcome.value = value,
                Err(err) => {
                    debug!(%err, "top-level statement aborted");
                    outcome.value = Value::Null;
                    outcome.errors.push(err);
                }
            }
            self.heap.truncate_roots(base);
        }
        outcome
    }

    /// Register a host function under `name` in the root scope.
    pub fn register_native(
        &mut self,
        name: &str,
        func: impl Fn(&mut Interpreter, &[Value]) -> EvalResult + 'static,
    ) -> Result<Value, EvalError> {
        let name = self.interner.intern(name);
        let raw = u32::try_from(self.natives.len())
            .unwrap_or_else(|_| panic!("native table exceeded u32::MAX entries"));
        self.natives.push(NativeEntry {
            name,
            func: Rc::new(func),
        });
        let value = Value::Native(NativeId::new(raw));
        self.heap.define(self.root, name, value)?;
        Ok(value)
    }

    /// Name a native was registered under.
    pub fn native_name(&self, id: NativeId) -> Option<&'static str> {
        self.natives
            .get(id.index())
            .map(|entry| self.interner.lookup(entry.name))
    }

    pub(crate) fn native(&self, id: NativeId) -> Option<NativeFn> {
        self.natives.get(id.index()).map(|entry| Rc::clone(&entry.func))
    }

    /// Register `callback` to run when the returned operation completes.
    pub fn register_operation(&mut self, callback: Value) -> OperationId {
        self.scheduler.register(callback)
    }

    /// Sender for reporting completions from host threads.
    pub fn completion_sender(&self) -> CompletionSender {
        self.scheduler.sender()
    }

    pub fn pending_operations(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Binding of `name` in the root scope.
    pub fn global(&self, name: &str) -> Option<Value> {
        let name = self.interner.intern(name);
        self.heap.lookup(self.root, name).ok().flatten()
    }

    /// Keep `value` alive until a matching [`unpin`](Self::unpin).
    pub fn pin(&mut self, value: Value) {
        self.heap.pin(value);
    }

    pub fn unpin(&mut self, value: Value) {
        self.heap.unpin(value);
    }

    /// Collect now, whatever the allocation count.
    pub fn collect_garbage(&mut self) -> GcStats {
        let roots: Vec<_> = std::iter::once(self.root.handle())
            .chain(self.scheduler.roots())
            .collect();
        self.heap.collect(roots)
    }

    /// Collect if enough has been allocated since the last collection.
    pub(crate) fn maybe_collect(&mut self) {
        if self.heap.should_collect() {
            let stats = self.collect_garbage();
            debug!(live = stats.live, freed = stats.freed, "collected at call entry");
        }
    }

    /// Render `value` as text.
    pub fn display(&self, value: Value, mode: DisplayMode) -> Result<String, EvalError> {
        display_string(&self.heap, &*self.interner, value, mode)
    }

    pub(crate) fn display_bytes(&self, value: Value, mode: DisplayMode) -> Result<Vec<u8>, EvalError> {
        display_bytes(&self.heap, &*self.interner, value, mode)
    }

    /// Allocate a string.
    pub fn new_string(&mut self, bytes: impl Into<Vec<u8>>) -> Value {
        self.heap.new_str(bytes)
    }

    #[inline]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    #[inline]
    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    #[inline]
    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured by a buffer print handler.
    pub fn print_output(&self) -> String {
        self.print_handler.output()
    }

    pub fn clear_print_output(&self) {
        self.print_handler.clear();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("heap", &self.heap)
            .field("natives", &self.natives.len())
            .field("scheduler", &self.scheduler)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
