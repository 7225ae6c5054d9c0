use super::{parse_err, parse_ok, sexpr, sexprs};
use crate::ParseErrorKind;
use oak_ir::Span;
use pretty_assertions::assert_eq;

// Operators and precedence

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(sexpr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(sexpr("1.5 / 2"), "(/ 1.5 2)");
}

#[test]
fn test_logic_below_comparison() {
    assert_eq!(sexpr("a = 1 | b != 2 & c"), "(| (= a 1) (& (!= b 2) c))");
}

#[test]
fn test_unary_binds_looser_than_postfix() {
    assert_eq!(sexpr("-x.y"), "(- (. x 'y'))");
    assert_eq!(sexpr("!!ok"), "(! (! ok))");
}

#[test]
fn test_define_is_right_associative() {
    assert_eq!(sexpr("a := b := 1"), "(:= a (:= b 1))");
}

#[test]
fn test_nonlocal_assign() {
    assert_eq!(sexpr("x <- x + 1"), "(<- x (+ x 1))");
}

#[test]
fn test_property_define() {
    assert_eq!(sexpr("o.k := 1"), "(:= (. o 'k') 1)");
}

#[test]
fn test_push_chains_left() {
    assert_eq!(sexpr("l << 1 << 2"), "(<< (<< l 1) 2)");
}

// Desugaring

#[test]
fn test_pipe_prepends_argument() {
    assert_eq!(sexpr("a |> f(b)"), "(f a b)");
    assert_eq!(sexpr("a |> f |> g(1)"), "(g (f a) 1)");
}

#[test]
fn test_pipe_continues_on_next_line() {
    assert_eq!(sexpr("xs\n  |> f()\n  |> g"), "(g (f xs))");
}

#[test]
fn test_with_appends_argument() {
    assert_eq!(sexpr("with f(a) fn(x) x"), "(f a (fn (x) x))");
}

// Postfix

#[test]
fn test_calls_and_properties() {
    assert_eq!(sexpr("print('hi')"), "(print 'hi')");
    assert_eq!(sexpr("f(1)(2)"), "((f 1) 2)");
    assert_eq!(sexpr("obj.a.0"), "(. (. obj 'a') 0)");
    assert_eq!(sexpr("obj.(k)"), "(. obj k)");
}

#[test]
fn test_call_args_across_lines() {
    assert_eq!(sexpr("f(\n  1\n  2\n)"), "(f 1 2)");
}

// Composite literals

#[test]
fn test_empty_braces_are_an_object() {
    assert_eq!(sexpr("{}"), "{}");
}

#[test]
fn test_object_keys() {
    assert_eq!(
        sexpr("{a: 1, 'b': 2, :c: 3}"),
        "{'a': 1, 'b': 2, :c: 3}"
    );
}

#[test]
fn test_blocks() {
    assert_eq!(sexpr("{ x := 1, x }"), "(do (:= x 1) x)");
    assert_eq!(sexpr("{\n  a\n  b\n}"), "(do a b)");
}

#[test]
fn test_groups() {
    assert_eq!(sexpr("(1, 2)"), "(do 1 2)");
    assert_eq!(sexpr("()"), "?");
}

#[test]
fn test_lists() {
    assert_eq!(sexpr("[1, 'two', :three, ?, _]"), "[1 'two' :three ? _]");
    assert_eq!(sexpr("[\n  1\n  2\n]"), "[1 2]");
}

// Functions

#[test]
fn test_named_function() {
    assert_eq!(sexpr("fn add(a, b) a + b"), "(fn add(a b) (+ a b))");
}

#[test]
fn test_rest_parameter() {
    assert_eq!(sexpr("fn(first, rest...) rest"), "(fn (first rest...) rest)");
}

#[test]
fn test_function_without_parens() {
    assert_eq!(sexpr("fn { 1 }"), "(fn () (do 1))");
}

// Matches

#[test]
fn test_fizzbuzz_match() {
    let source = "if [n % 3, n % 5] {
        [0, 0] -> 'FizzBuzz'
        [0, _] -> 'Fizz'
        [_, 0] -> 'Buzz'
        _ -> string(n)
    }";
    assert_eq!(
        sexpr(source),
        "(if [(% n 3) (% n 5)] {[0 0] -> 'FizzBuzz', [0 _] -> 'Fizz', [_ 0] -> 'Buzz', _ -> (string n)})"
    );
}

#[test]
fn test_alternatives_expand_to_clauses() {
    assert_eq!(
        sexpr("if x { 1, 2 -> :small, _ -> :big }"),
        "(if x {1 -> :small, 2 -> :small, _ -> :big})"
    );
}

#[test]
fn test_subjectless_if_matches_true() {
    assert_eq!(sexpr("if { a > 1 -> 'big' }"), "(if true {(> a 1) -> 'big'})");
}

#[test]
fn test_binding_patterns() {
    assert_eq!(
        sexpr("if v { n := _ -> n, [h := 1, _] -> h, {type: :error, message: m := _} -> m }"),
        "(if v {n@_ -> n, [h@1 _] -> h, {type: :error, message: m@_} -> m})"
    );
}

// Programs

#[test]
fn test_program_splits_on_lines() {
    assert_eq!(
        sexprs("a := 1\nb := 2\n\na + b\n"),
        vec!["(:= a 1)", "(:= b 2)", "(+ a b)"]
    );
}

#[test]
fn test_empty_program() {
    assert!(sexprs("\n// nothing here\n").is_empty());
}

#[test]
fn test_spans_cover_operands() {
    let (program, _) = parse_ok("a + b");
    let span = program.arena.get_expr(program.body[0]).span;
    assert_eq!(span, Span::new(0, 5));
}

// Errors

#[test]
fn test_invalid_define_target() {
    assert_eq!(parse_err("1 := 2"), ParseErrorKind::InvalidAssignTarget);
}

#[test]
fn test_nonlocal_requires_name() {
    assert_eq!(parse_err("a.b <- 1"), ParseErrorKind::InvalidNonlocalTarget);
}

#[test]
fn test_with_requires_call() {
    assert_eq!(parse_err("with f 1"), ParseErrorKind::WithWithoutCall);
}

#[test]
fn test_rest_must_be_last() {
    assert_eq!(parse_err("fn(a..., b) a"), ParseErrorKind::RestNotLast);
}

#[test]
fn test_unclosed_list() {
    assert_eq!(
        parse_err("[1, 2"),
        ParseErrorKind::UnexpectedToken {
            expected: "`,` or `]`",
            found: "end of input".to_string(),
        }
    );
}

#[test]
fn test_computed_pattern_key_rejected() {
    assert_eq!(
        parse_err("if x { {f(): 1} -> 1 }"),
        ParseErrorKind::InvalidPatternKey
    );
}

#[test]
fn test_missing_separator_between_expressions() {
    assert_eq!(
        parse_err("1 2"),
        ParseErrorKind::UnexpectedToken {
            expected: "`,` or a new line",
            found: "integer 2".to_string(),
        }
    );
}
