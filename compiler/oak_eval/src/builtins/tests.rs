#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use crate::errors::EvalErrorKind;
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;
use crate::value::DisplayMode;
use crate::EvalResult;

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

fn run(interp: &mut Interpreter, source: &str) -> EvalResult {
    let program = oak_parse::parse(source, interp.interner()).unwrap_or_else(|e| panic!("{e}"));
    interp.eval_program(&program).into_result()
}

fn eval_debug(source: &str) -> String {
    let mut interp = interpreter();
    let value = run(&mut interp, source).unwrap_or_else(|e| panic!("{e}"));
    interp.display(value, DisplayMode::Debug).unwrap()
}

/// Output printed by `source`.
fn output(source: &str) -> String {
    let mut interp = interpreter();
    run(&mut interp, source).unwrap_or_else(|e| panic!("{e}"));
    interp.print_output()
}

mod output {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_and_println() {
        assert_eq!(output("println('hi')\nprint(1)\nprint(:a)"), "hi\n1a");
    }

    #[test]
    fn test_nested_strings_are_quoted() {
        assert_eq!(output("println([1, 'a', :b, ?])"), "[1, 'a', :b, ?]\n");
    }

    #[test]
    fn test_print_returns_null() {
        assert_eq!(eval_debug("print('')"), "?");
    }
}

mod conversions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_copies() {
        let source = "
s := 'abc'
t := string(s)
t << 'd'
[s, t, string(12), string(:x), string(1.5)]
";
        assert_eq!(eval_debug(source), "['abc', 'abcd', '12', 'x', '1.5']");
    }

    #[test]
    fn test_int() {
        assert_eq!(
            eval_debug("[int(3), int(3.9), int(-3.9), int(' 42 '), int('2.5'), int('x'), int([])]"),
            "[3, 3, -3, 42, 2, ?, ?]"
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(
            eval_debug("[float(2), float(1.5), float('0.25'), float('no')]"),
            "[2.0, 1.5, 0.25, ?]"
        );
    }

    #[test]
    fn test_atom() {
        assert_eq!(
            eval_debug("[atom('x'), atom(:y), atom(12), atom('x') = :x]"),
            "[:x, :y, :12, true]"
        );
    }

    #[test]
    fn test_char_and_codepoint() {
        assert_eq!(
            eval_debug("[char(65), codepoint('A'), codepoint('')]"),
            "['A', 65, ?]"
        );
    }

    #[test]
    fn test_char_out_of_range() {
        let mut interp = interpreter();
        let err = run(&mut interp, "char(256)").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    }
}

mod introspection {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type() {
        assert_eq!(
            eval_debug("[type(?), type(_), type(1), type(1.0), type(true), type('s'), type(:a)]"),
            "[:null, :empty, :int, :float, :bool, :string, :atom]"
        );
        assert_eq!(
            eval_debug("[type([]), type({}), type(fn {}), type(print)]"),
            "[:list, :object, :function, :function]"
        );
    }

    #[test]
    fn test_len() {
        assert_eq!(eval_debug("[len('abc'), len([1]), len({a: 1, b: 2})]"), "[3, 1, 2]");
    }

    #[test]
    fn test_len_of_number_fails() {
        let mut interp = interpreter();
        let err = run(&mut interp, "len(3)").unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::TypeMismatch {
                expected: "string, list or object".to_string(),
                got: "int".to_string(),
                operation: "len".to_string(),
            }
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        assert_eq!(eval_debug("keys({b: 1, a: 2, c: 3})"), "['a', 'b', 'c']");
    }
}

mod copying {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clone_is_independent() {
        let source = "
fn check(l) {
    c := clone(l)
    c.0 << 9
    [l, c]
}
check([[1]])
";
        assert_eq!(eval_debug(source), "[[[1]], [[1, 9]]]");
    }

    #[test]
    fn test_slice() {
        assert_eq!(
            eval_debug("[slice([1, 2, 3, 4], 1, 3), slice('hello', 3), slice([1], -5, 99), slice('abc', 2, 1)]"),
            "[[2, 3], 'lo', [1], '']"
        );
    }
}

mod host {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wait_runs_callback() {
        let mut interp = interpreter();
        run(&mut interp, "wait(0, fn { println('waited') })\nprintln('first')").unwrap();
        let report = interp.run_event_loop();
        assert!(report.is_clean());
        assert_eq!(interp.print_output(), "first\nwaited\n");
    }

    #[test]
    fn test_wait_requires_callback() {
        let mut interp = interpreter();
        let err = run(&mut interp, "wait(0, 1)").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
        assert_eq!(interp.pending_operations(), 0);
    }

    #[test]
    fn test_read_missing_file_delivers_error() {
        let mut interp = interpreter();
        let source = "readFile('/definitely/not/here/oak.txt', fn(r) if r {
    {type: :error} -> println('missing')
    _ -> println('found')
})";
        run(&mut interp, source).unwrap();
        interp.run_event_loop();
        assert_eq!(interp.print_output(), "missing\n");
    }

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join(format!("oak-builtins-{}.txt", std::process::id()));
        let path_text = path.to_string_lossy().into_owned();
        let source = format!(
            "path := '{path_text}'
writeFile(path, 'hello oak', fn(ok) readFile(path, fn(s) {{
    println(ok)
    println(s)
}}))"
        );

        let mut interp = interpreter();
        run(&mut interp, &source).unwrap();
        let report = interp.run_event_loop();
        let _ = std::fs::remove_file(&path);

        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.callbacks_run, 2);
        assert_eq!(interp.print_output(), "true\nhello oak\n");
    }
}
