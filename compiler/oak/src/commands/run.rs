//! The `run` command: evaluate an Oak source file.

use super::{interpreter, report_errors};
use crate::run_source;

/// Run the program in `path`. Its last value is not printed.
pub fn run_file(path: &str) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            return 1;
        }
    };

    let mut interpreter = interpreter();
    match run_source(&mut interpreter, &source) {
        Ok(outcome) => i32::from(report_errors(path, &source, &outcome)),
        Err(err) => {
            eprintln!("{}", err.render(path, &source));
            1
        }
    }
}
