//! On-demand stack growth.
//!
//! The parser recurses once per nesting level and the evaluator once per
//! non-tail call, so both wrap their recursive entry points in
//! [`ensure_sufficient_stack`]. When less than [`RED_ZONE`] bytes of stack
//! remain, a fresh [`GROWTH`]-byte segment is allocated before running `f`.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
