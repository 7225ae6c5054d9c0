//! Completion queue for host operations.
//!
//! Oak code runs on one thread. A built-in that starts host work registers
//! its callback here, receives an [`OperationId`], and hands a
//! [`CompletionSender`] to whatever thread does the work. That thread sends
//! a [`Completion`] carrying a [`HostValue`] (plain data, `Send`); the
//! interpreter turns it into a heap value and runs the callback.
//!
//! The channel is the only synchronization point between host threads and
//! evaluation. Callbacks run in completion order.

use std::fmt;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use oak_ir::StringInterner;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{reentrant_callback, unknown_operation, EvalError};
use crate::value::{Handle, Heap, ObjectMap, Value};

/// Identifier of one registered host operation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct OperationId(u64);

impl OperationId {
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        OperationId(raw)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result data produced off the evaluation thread.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Atom(String),
    Str(Vec<u8>),
    List(Vec<HostValue>),
    Object(Vec<(String, HostValue)>),
}

impl HostValue {
    /// Allocate this value on `heap`.
    pub fn into_value(self, heap: &mut Heap, interner: &StringInterner) -> Value {
        match self {
            HostValue::Null => Value::Null,
            HostValue::Bool(b) => Value::Bool(b),
            HostValue::Int(n) => Value::Int(n),
            HostValue::Float(f) => Value::Float(f),
            HostValue::Atom(name) => Value::Atom(interner.intern(&name)),
            HostValue::Str(bytes) => heap.new_str(bytes),
            HostValue::List(items) => {
                let items = items
                    .into_iter()
                    .map(|item| item.into_value(heap, interner))
                    .collect();
                heap.new_list(items)
            }
            HostValue::Object(entries) => {
                let mut map = ObjectMap::default();
                for (key, item) in entries {
                    let item = item.into_value(heap, interner);
                    map.insert(key.into_bytes(), item);
                }
                heap.new_object(map)
            }
        }
    }

    /// The value delivered to a callback when its operation fails.
    pub fn error(message: impl Into<String>) -> HostValue {
        HostValue::Object(vec![
            ("type".to_string(), HostValue::Atom("error".to_string())),
            ("message".to_string(), HostValue::Str(message.into().into_bytes())),
        ])
    }
}

/// A finished host operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub operation: OperationId,
    /// `Err` carries a failure message; the callback still runs.
    pub result: Result<HostValue, String>,
}

impl Completion {
    /// The value passed to the callback.
    pub fn into_host_value(self) -> HostValue {
        match self.result {
            Ok(value) => value,
            Err(message) => HostValue::error(message),
        }
    }
}

/// Sending half of the completion queue. Cheap to clone and `Send`.
#[derive(Clone, Debug)]
pub struct CompletionSender {
    tx: Sender<Completion>,
}

impl CompletionSender {
    /// Report success.
    pub fn complete(&self, operation: OperationId, value: HostValue) {
        self.send(Completion {
            operation,
            result: Ok(value),
        });
    }

    /// Report failure; the callback receives `{type: :error, message: ...}`.
    pub fn fail(&self, operation: OperationId, message: impl Into<String>) {
        self.send(Completion {
            operation,
            result: Err(message.into()),
        });
    }

    fn send(&self, completion: Completion) {
        let operation = completion.operation;
        if self.tx.send(completion).is_err() {
            debug!(%operation, "interpreter gone; dropping completion");
        }
    }
}

/// Pending callbacks and the receiving half of the queue.
pub struct Scheduler {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    pending: FxHashMap<OperationId, Value>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Scheduler {
            tx,
            rx,
            pending: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub fn sender(&self) -> CompletionSender {
        CompletionSender {
            tx: self.tx.clone(),
        }
    }

    /// Register `callback` to run when the returned operation completes.
    pub fn register(&mut self, callback: Value) -> OperationId {
        let operation = OperationId(self.next_id);
        self.next_id += 1;
        self.pending.insert(operation, callback);
        debug!(%operation, pending = self.pending.len(), "registered host operation");
        operation
    }

    /// Remove and return the callback for `operation`.
    ///
    /// An id that was issued but is no longer pending has already fired.
    pub fn take(&mut self, operation: OperationId) -> Result<Value, EvalError> {
        if let Some(callback) = self.pending.remove(&operation) {
            return Ok(callback);
        }
        if operation.0 < self.next_id {
            Err(reentrant_callback(operation))
        } else {
            Err(unknown_operation(operation))
        }
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Callbacks awaiting completion, as GC roots.
    pub fn roots(&self) -> impl Iterator<Item = Handle> + '_ {
        self.pending.values().filter_map(Value::handle)
    }

    /// Next queued completion, without blocking.
    pub fn try_next(&self) -> Option<Completion> {
        match self.rx.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Next completion, blocking until one arrives.
    ///
    /// Never disconnects: the scheduler holds a sender of its own.
    pub fn next_blocking(&self) -> Option<Completion> {
        self.rx.recv().ok()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

/// What one run of the event loop did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLoopReport {
    /// Callbacks invoked, whether or not they succeeded.
    pub callbacks_run: usize,
    /// Errors raised inside callbacks, in the order they occurred.
    pub errors: Vec<EvalError>,
    /// Completions refused as duplicate or unknown.
    pub rejected: Vec<EvalError>,
}

impl EventLoopReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.rejected.is_empty()
    }
}
