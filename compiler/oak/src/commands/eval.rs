//! The `eval` command: evaluate a snippet and print its value.

use super::{interpreter, report_errors};
use crate::run_source;

const LABEL: &str = "<eval>";

/// Evaluate `source` and print the debug rendering of its last value.
///
/// The value is not printed when a top-level statement failed.
pub fn eval_expression(source: &str) -> i32 {
    let mut interpreter = interpreter();
    match run_source(&mut interpreter, source) {
        Ok(outcome) => {
            let failed = report_errors(LABEL, source, &outcome);
            if outcome.errors.is_empty() {
                println!("{}", outcome.value);
            }
            i32::from(failed)
        }
        Err(err) => {
            eprintln!("{}", err.render(LABEL, source));
            1
        }
    }
}
