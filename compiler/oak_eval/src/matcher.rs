//! Pattern matching for `if` expressions.
//!
//! Matching never fails on shape: a subject of the wrong variant, a list of
//! the wrong length or an object missing a key is a non-match. Errors only
//! come from evaluating expression patterns.

use oak_ir::{Clause, ExprId, Name, Pattern, PatternId, SharedArena};
use oak_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::environment::ScopeId;
use crate::errors::EvalError;
use crate::value::{equals, Heap, Value};

/// Names bound by a successful match, in pattern order.
pub type Bindings = SmallVec<[(Name, Value); 4]>;

/// What the matcher needs from the evaluator.
pub trait PatternEvaluator {
    fn heap(&self) -> &Heap;

    fn heap_mut(&mut self) -> &mut Heap;

    /// Evaluate an expression pattern in `scope`.
    fn eval_pattern_expr(
        &mut self,
        arena: &SharedArena,
        expr: ExprId,
        scope: ScopeId,
    ) -> Result<Value, EvalError>;
}

/// Match `subject` against `pattern`, appending bindings on success.
///
/// Bound values are pushed on the heap root stack, since evaluating a later
/// expression pattern may collect. On a non-match `bindings` may hold
/// partial results; callers discard them.
pub fn try_match<E: PatternEvaluator + ?Sized>(
    evaluator: &mut E,
    arena: &SharedArena,
    pattern: PatternId,
    subject: Value,
    scope: ScopeId,
    bindings: &mut Bindings,
) -> Result<bool, EvalError> {
    match *arena.get_pattern(pattern) {
        Pattern::Empty { bind } => {
            if let Some(name) = bind {
                bind_value(evaluator, bindings, name, subject);
            }
            Ok(true)
        }
        Pattern::Bind { name, pattern } => {
            if !try_match(evaluator, arena, pattern, subject, scope, bindings)? {
                return Ok(false);
            }
            bind_value(evaluator, bindings, name, subject);
            Ok(true)
        }
        Pattern::Expr(expr) => {
            let expected = evaluator.eval_pattern_expr(arena, expr, scope)?;
            equals(evaluator.heap(), expected, subject)
        }
        Pattern::List(range) => {
            let Value::List(handle) = subject else {
                return Ok(false);
            };
            let patterns = arena.get_pattern_list(range);
            if evaluator.heap().list(handle)?.len() != patterns.len() {
                return Ok(false);
            }
            for (i, &element) in patterns.iter().enumerate() {
                // Re-read each element: an expression pattern may have mutated the list.
                let Some(item) = evaluator.heap().list(handle)?.get(i).copied() else {
                    return Ok(false);
                };
                let matched = ensure_sufficient_stack(|| {
                    try_match(evaluator, arena, element, item, scope, bindings)
                })?;
                if !matched {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Pattern::Object(range) => {
            let Value::Object(handle) = subject else {
                return Ok(false);
            };
            for entry in arena.get_pattern_entries(range) {
                let key = arena.get_str(entry.key);
                let Some(item) = evaluator.heap().object(handle)?.get(key).copied() else {
                    return Ok(false);
                };
                let matched = ensure_sufficient_stack(|| {
                    try_match(evaluator, arena, entry.pattern, item, scope, bindings)
                })?;
                if !matched {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

fn bind_value<E: PatternEvaluator + ?Sized>(
    evaluator: &mut E,
    bindings: &mut Bindings,
    name: Name,
    value: Value,
) {
    evaluator.heap_mut().push_root(value);
    bindings.push((name, value));
}

/// Try `clauses` top to bottom against `subjects`.
///
/// Returns the body of the first clause whose patterns all match, with its
/// bindings, or `None` when no clause matches.
pub fn select_clause<E: PatternEvaluator + ?Sized>(
    evaluator: &mut E,
    arena: &SharedArena,
    clauses: &[Clause],
    subjects: &[Value],
    scope: ScopeId,
) -> Result<Option<(ExprId, Bindings)>, EvalError> {
    let mut bindings = Bindings::new();
    'clauses: for clause in clauses {
        let patterns = arena.get_pattern_list(clause.patterns);
        if patterns.len() != subjects.len() {
            continue;
        }
        bindings.clear();
        for (&pattern, &subject) in patterns.iter().zip(subjects) {
            if !try_match(evaluator, arena, pattern, subject, scope, &mut bindings)? {
                continue 'clauses;
            }
        }
        return Ok(Some((clause.body, bindings)));
    }
    Ok(None)
}
