//! Function calls and the tail-call trampoline.

use tracing::trace;

use super::eval::{Args, Flow};
use super::Interpreter;
use crate::environment::ScopeId;
use crate::errors::{call_depth_exceeded, invalid_reference, not_callable, EvalError, EvalResult};
use crate::value::{Closure, Handle, NativeId, Value};

impl Interpreter {
    /// Call `callee` with `args`.
    ///
    /// Arguments are passed by reference: a callee pushing onto a list
    /// argument mutates the caller's list. Missing arguments bind `?` and
    /// surplus ones are dropped unless the function declares `rest...`.
    pub fn call_value(&mut self, callee: Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Function(handle) => self.call_function(handle, args),
            Value::Native(id) => self.call_native(id, args),
            other => Err(not_callable(&other)),
        }
    }

    fn call_native(&mut self, id: NativeId, args: &[Value]) -> EvalResult {
        let func = self.native(id).ok_or_else(invalid_reference)?;
        let mark = self.heap.root_mark();
        for &arg in args {
            self.heap.push_root(arg);
        }
        let result = func(self, args);
        self.heap.truncate_roots(mark);
        result
    }

    /// Non-tail call: one level of call depth, then the trampoline.
    fn call_function(&mut self, function: Handle, args: &[Value]) -> EvalResult {
        let limit = self.config.max_call_depth;
        if self.call_depth >= limit {
            return Err(call_depth_exceeded(limit));
        }
        self.call_depth += 1;
        let base = self.heap.root_mark();
        let result = self.run_trampoline(function, Args::from_slice(args), base);
        self.heap.truncate_roots(base);
        self.call_depth -= 1;
        result
    }

    /// Run a function body, looping on tail calls instead of recursing.
    ///
    /// Each iteration drops the previous call's roots before rooting the new
    /// scope. The pending callee and arguments are unrooted in between; that
    /// is sound because nothing collects until the new scope holds them.
    fn run_trampoline(&mut self, mut function: Handle, mut args: Args, base: usize) -> EvalResult {
        loop {
            let closure = self.heap.closure(function)?.clone();
            let scope = self.bind_arguments(&closure, &args)?;
            self.heap.truncate_roots(base);
            self.heap.push_scope_root(scope);
            self.maybe_collect();

            let def = closure.arena.get_function(closure.function);
            trace!(
                function = def.name.map_or("<anonymous>", |name| self.interner.lookup(name)),
                args = args.len(),
                depth = self.call_depth,
                "call"
            );
            match self.eval_flow(&closure.arena, def.body, scope, true)? {
                Flow::Value(value) => return Ok(value),
                Flow::TailCall {
                    callee: Value::Function(next),
                    args: next_args,
                } => {
                    function = next;
                    args = next_args;
                }
                Flow::TailCall { callee, args } => return self.call_value(callee, &args),
            }
        }
    }

    /// Fresh scope under the closure's defining scope holding the parameters.
    fn bind_arguments(&mut self, closure: &Closure, args: &[Value]) -> Result<ScopeId, EvalError> {
        let def = closure.arena.get_function(closure.function);
        let params = closure.arena.get_params(def.params);
        let scope = self.heap.new_scope(Some(closure.scope));
        for (i, &param) in params.iter().enumerate() {
            let value = args.get(i).copied().unwrap_or(Value::Null);
            self.heap.define(scope, param, value)?;
        }
        if let Some(rest) = def.rest {
            let surplus = args.get(params.len()..).unwrap_or_default().to_vec();
            let surplus = self.heap.new_list(surplus);
            self.heap.define(scope, rest, surplus)?;
        }
        Ok(scope)
    }
}
