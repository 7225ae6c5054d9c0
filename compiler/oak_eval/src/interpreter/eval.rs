//! Expression evaluation.
//!
//! `eval_node` dispatches on `ExprKind`. Calls in tail position (last
//! expression of a function body, looking through blocks and match bodies)
//! come back as [`Flow::TailCall`] so the trampoline in `function_call`
//! can reuse its Rust frame.

use oak_ir::{ClauseRange, ExprId, ExprKind, ExprRange, SharedArena};
use oak_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::Interpreter;
use crate::environment::ScopeId;
use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::matcher::{select_clause, PatternEvaluator};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::{
    deep_clone, get_property, object_key, push, set_property, Closure, Heap, ObjectMap, Value,
};

/// Evaluated call arguments.
pub(crate) type Args = SmallVec<[Value; 4]>;

/// Outcome of evaluating one node.
pub(crate) enum Flow {
    Value(Value),
    /// A call in tail position, not yet made.
    TailCall { callee: Value, args: Args },
}

impl Interpreter {
    /// Evaluate `id` in `scope` to a value.
    pub(crate) fn eval(&mut self, arena: &SharedArena, id: ExprId, scope: ScopeId) -> EvalResult {
        match self.eval_flow(arena, id, scope, false)? {
            Flow::Value(value) => Ok(value),
            Flow::TailCall { callee, args } => self.call_value(callee, &args),
        }
    }

    /// Evaluate `id`; with `tail` set, a call in tail position is returned
    /// unmade instead of recursing.
    pub(crate) fn eval_flow(
        &mut self,
        arena: &SharedArena,
        id: ExprId,
        scope: ScopeId,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let span = arena.get_expr(id).span;
        ensure_sufficient_stack(|| self.eval_node(arena, id, scope, tail))
            .map_err(|err| err.or_span(span))
    }

    fn eval_node(
        &mut self,
        arena: &SharedArena,
        id: ExprId,
        scope: ScopeId,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let mark = self.heap.root_mark();
        let value = match &arena.get_expr(id).kind {
            // Literals
            ExprKind::Null => Value::Null,
            ExprKind::Empty => Value::Empty,
            ExprKind::Bool(b) => Value::Bool(*b),
            ExprKind::Int(n) => Value::Int(*n),
            ExprKind::Float(f) => Value::Float(*f),
            ExprKind::Atom(name) => Value::Atom(*name),
            // Each evaluation yields a fresh, independently mutable string.
            ExprKind::Str(s) => self.heap.new_str(arena.get_str(*s).to_vec()),

            ExprKind::Ident(name) => self.heap.resolve(scope, *name, &*self.interner)?,

            ExprKind::List(range) => {
                let elements = arena.get_expr_list(*range);
                let mut items = Vec::with_capacity(elements.len());
                for &element in elements {
                    let item = self.eval(arena, element, scope)?;
                    self.heap.push_root(item);
                    items.push(item);
                }
                self.heap.new_list(items)
            }

            ExprKind::Object(range) => {
                let mut map = ObjectMap::default();
                for entry in arena.get_entries(*range) {
                    let key = self.eval_key(arena, entry.key, scope)?;
                    let item = self.eval(arena, entry.value, scope)?;
                    self.heap.push_root(item);
                    map.insert(key, item);
                }
                self.heap.new_object(map)
            }

            ExprKind::Block(range) => {
                let flow = self.eval_block(arena, arena.get_expr_list(*range), scope, tail);
                self.heap.truncate_roots(mark);
                return flow;
            }

            ExprKind::Function(function) => {
                let closure = self.heap.new_closure(Closure {
                    function: *function,
                    arena: arena.clone(),
                    scope,
                });
                if let Some(name) = arena.get_function(*function).name {
                    self.heap.define(scope, name, closure)?;
                }
                closure
            }

            ExprKind::Call { callee, args } => {
                let flow = self.eval_call(arena, *callee, arena.get_expr_list(*args), scope, tail);
                self.heap.truncate_roots(mark);
                return flow;
            }

            ExprKind::Match { subjects, clauses } => {
                let flow = self.eval_match(arena, *subjects, *clauses, scope, tail);
                self.heap.truncate_roots(mark);
                return flow;
            }

            ExprKind::Unary { op, operand } => {
                let operand = self.eval(arena, *operand, scope)?;
                evaluate_unary(operand, *op)?
            }

            ExprKind::Binary { op, left, right } => {
                // Both operands are always evaluated; `&` and `|` do not short-circuit.
                let left = self.eval(arena, *left, scope)?;
                self.heap.push_root(left);
                let right = self.eval(arena, *right, scope)?;
                evaluate_binary(&mut self.heap, left, right, *op)?
            }

            ExprKind::Define { target, value } => self.eval_define(arena, *target, *value, scope)?,

            ExprKind::Assign { name, value } => {
                let value = self.eval_owned(arena, *value, scope)?;
                self.heap
                    .assign_nonlocal(scope, *name, value, &*self.interner)?;
                value
            }

            ExprKind::Push { target, value } => {
                let target = self.eval(arena, *target, scope)?;
                self.heap.push_root(target);
                let value = self.eval(arena, *value, scope)?;
                push(&mut self.heap, target, value)?
            }

            ExprKind::Property { object, key } => {
                let container = self.eval(arena, *object, scope)?;
                self.heap.push_root(container);
                let key = self.eval(arena, *key, scope)?;
                get_property(&mut self.heap, &self.interner, container, key)?
            }
        };
        self.heap.truncate_roots(mark);
        Ok(Flow::Value(value))
    }

    /// Evaluate a value about to be stored by `:=` or `<-`.
    ///
    /// Stored composites are deep copies, so later mutation through the
    /// binding never reaches the source. A string literal already evaluates
    /// to a fresh string and skips the copy.
    fn eval_owned(&mut self, arena: &SharedArena, id: ExprId, scope: ScopeId) -> EvalResult {
        let value = self.eval(arena, id, scope)?;
        if matches!(arena.get_expr(id).kind, ExprKind::Str(_)) {
            return Ok(value);
        }
        deep_clone(&mut self.heap, value)
    }

    /// Object literal key: string literals (including bare names) are used
    /// as-is, anything else is evaluated and normalized.
    fn eval_key(
        &mut self,
        arena: &SharedArena,
        id: ExprId,
        scope: ScopeId,
    ) -> Result<Vec<u8>, EvalError> {
        if let ExprKind::Str(s) = arena.get_expr(id).kind {
            return Ok(arena.get_str(s).to_vec());
        }
        let key = self.eval(arena, id, scope)?;
        object_key(&self.heap, &self.interner, key)
    }

    fn eval_block(
        &mut self,
        arena: &SharedArena,
        body: &[ExprId],
        scope: ScopeId,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let Some((&last, init)) = body.split_last() else {
            return Ok(Flow::Value(Value::Null));
        };
        let inner = self.heap.new_scope(Some(scope));
        self.heap.push_scope_root(inner);
        for &expr in init {
            self.eval(arena, expr, inner)?;
        }
        self.eval_flow(arena, last, inner, tail)
    }

    fn eval_call(
        &mut self,
        arena: &SharedArena,
        callee: ExprId,
        args: &[ExprId],
        scope: ScopeId,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let callee = self.eval(arena, callee, scope)?;
        self.heap.push_root(callee);
        let mut values = Args::with_capacity(args.len());
        for &arg in args {
            let value = self.eval(arena, arg, scope)?;
            self.heap.push_root(value);
            values.push(value);
        }
        if tail && matches!(callee, Value::Function(_)) {
            return Ok(Flow::TailCall {
                callee,
                args: values,
            });
        }
        self.call_value(callee, &values).map(Flow::Value)
    }

    fn eval_match(
        &mut self,
        arena: &SharedArena,
        subjects: ExprRange,
        clauses: ClauseRange,
        scope: ScopeId,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let subject_exprs = arena.get_expr_list(subjects);
        let mut values: SmallVec<[Value; 2]> = SmallVec::with_capacity(subject_exprs.len());
        for &subject in subject_exprs {
            let value = self.eval(arena, subject, scope)?;
            self.heap.push_root(value);
            values.push(value);
        }

        let selected = select_clause(self, arena, arena.get_clauses(clauses), &values, scope)?;
        let Some((body, bindings)) = selected else {
            return Ok(Flow::Value(Value::Null));
        };
        let inner = self.heap.new_scope(Some(scope));
        self.heap.push_scope_root(inner);
        for (name, value) in bindings {
            self.heap.define(inner, name, value)?;
        }
        self.eval_flow(arena, body, inner, tail)
    }

    /// `name := value` defines in `scope`; `container.key := value` writes
    /// in place and yields the container.
    fn eval_define(
        &mut self,
        arena: &SharedArena,
        target: ExprId,
        value: ExprId,
        scope: ScopeId,
    ) -> EvalResult {
        match arena.get_expr(target).kind {
            ExprKind::Ident(name) => {
                let value = self.eval_owned(arena, value, scope)?;
                self.heap.define(scope, name, value)?;
                Ok(value)
            }
            ExprKind::Property { object, key } => {
                let container = self.eval(arena, object, scope)?;
                self.heap.push_root(container);
                let key = self.eval(arena, key, scope)?;
                self.heap.push_root(key);
                let value = self.eval_owned(arena, value, scope)?;
                set_property(&mut self.heap, &self.interner, container, key, value)
            }
            _ => Err(type_mismatch(":=", "name or property", "expression")),
        }
    }
}

impl PatternEvaluator for Interpreter {
    fn heap(&self) -> &Heap {
        &self.heap
    }

    fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    fn eval_pattern_expr(
        &mut self,
        arena: &SharedArena,
        expr: ExprId,
        scope: ScopeId,
    ) -> Result<Value, EvalError> {
        self.eval(arena, expr, scope)
    }
}
