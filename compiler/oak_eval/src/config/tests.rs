use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_defaults_without_variables() {
    assert_eq!(InterpreterConfig::from_lookup(|_| None), InterpreterConfig::default());
}

#[test]
fn test_overrides() {
    let config = InterpreterConfig::from_lookup(|key| match key {
        MAX_CALL_DEPTH_VAR => Some("250".to_string()),
        GC_THRESHOLD_VAR => Some(" 1000 ".to_string()),
        _ => None,
    });
    assert_eq!(config.max_call_depth, 250);
    assert_eq!(config.gc_threshold, 1000);
}

#[test]
fn test_garbage_is_ignored() {
    let config = InterpreterConfig::from_lookup(|key| {
        (key == MAX_CALL_DEPTH_VAR).then(|| "lots".to_string())
    });
    assert_eq!(config.max_call_depth, InterpreterConfig::DEFAULT_MAX_CALL_DEPTH);
}
