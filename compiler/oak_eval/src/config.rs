//! Interpreter limits.

use tracing::warn;

/// Environment variable overriding [`InterpreterConfig::max_call_depth`].
pub const MAX_CALL_DEPTH_VAR: &str = "OAK_MAX_CALL_DEPTH";

/// Environment variable overriding [`InterpreterConfig::gc_threshold`].
pub const GC_THRESHOLD_VAR: &str = "OAK_GC_THRESHOLD";

/// Tunable limits for one interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum nesting of non-tail calls before `CallDepthExceeded`.
    /// Tail calls do not count.
    pub max_call_depth: usize,
    /// Allocations between collections. After each collection the next
    /// threshold is the larger of this and twice the surviving object count.
    pub gc_threshold: usize,
}

impl InterpreterConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;
    pub const DEFAULT_GC_THRESHOLD: usize = 50_000;

    /// Defaults, overridden by `OAK_MAX_CALL_DEPTH` / `OAK_GC_THRESHOLD`
    /// when set. Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(depth) = parse_var(&lookup, MAX_CALL_DEPTH_VAR) {
            config.max_call_depth = depth;
        }
        if let Some(threshold) = parse_var(&lookup, GC_THRESHOLD_VAR) {
            config.gc_threshold = threshold.max(1);
        }
        config
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring non-numeric setting");
            None
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
            gc_threshold: Self::DEFAULT_GC_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests;
