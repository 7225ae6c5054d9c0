use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    lex(source, &interner)
        .unwrap_or_else(|e| panic!("lex failed: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_err(source: &str) -> ParseErrorKind {
    let interner = StringInterner::new();
    match lex(source, &interner) {
        Ok(tokens) => panic!("expected lex error, got {tokens:?}"),
        Err(e) => e.kind,
    }
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds(":= <- << |> -> <= >= != = < > - !"),
        vec![
            TokenKind::Define,
            TokenKind::Nonlocal,
            TokenKind::Push,
            TokenKind::Pipe,
            TokenKind::Arrow,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::NotEq,
            TokenKind::Eq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Minus,
            TokenKind::Bang,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("42 3.5"),
        vec![TokenKind::Int(42), TokenKind::Float(3.5), TokenKind::Eof]
    );
}

#[test]
fn test_number_after_dot_is_integer_index() {
    let interner = StringInterner::new();
    let tokens = lex("m.0.1", &interner).unwrap_or_else(|e| panic!("{e}"));
    let m = interner.intern("m");
    let got: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Ident(m),
            TokenKind::Dot,
            TokenKind::Int(0),
            TokenKind::Dot,
            TokenKind::Int(1),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        kinds(r#"'a\'b\n' "q\x41\\""#),
        vec![
            TokenKind::Str(b"a'b\n".to_vec().into_boxed_slice()),
            TokenKind::Str(b"qA\\".to_vec().into_boxed_slice()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(lex_err("'abc"), ParseErrorKind::UnterminatedString);
}

#[test]
fn test_keywords_and_values() {
    assert_eq!(
        kinds("fn if with true false ? _"),
        vec![
            TokenKind::Fn,
            TokenKind::If,
            TokenKind::With,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Question,
            TokenKind::Underscore,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_atom_versus_key_colon() {
    let interner = StringInterner::new();
    let tokens = lex("{type: :error}", &interner).unwrap_or_else(|e| panic!("{e}"));
    let ty = interner.intern("type");
    let error = interner.intern("error");
    let got: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::LBrace,
            TokenKind::Ident(ty),
            TokenKind::Colon,
            TokenKind::Atom(error),
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_key_colon_without_space() {
    let interner = StringInterner::new();
    let tokens = lex("{a:b}", &interner).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(tokens[2].kind, TokenKind::Colon);
}

#[test]
fn test_newline_inserts_comma_after_expression() {
    assert_eq!(
        kinds("1\n2\n"),
        vec![
            TokenKind::Int(1),
            TokenKind::Comma,
            TokenKind::Int(2),
            TokenKind::Comma,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_newline_after_operator_continues() {
    assert_eq!(
        kinds("1 +\n2"),
        vec![
            TokenKind::Int(1),
            TokenKind::Plus,
            TokenKind::Int(2),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_blank_lines_insert_one_comma() {
    assert_eq!(
        kinds("?\n\n\n?"),
        vec![
            TokenKind::Question,
            TokenKind::Comma,
            TokenKind::Question,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_pipe_on_next_line_continues() {
    assert_eq!(
        kinds("?\n  |> ?"),
        vec![
            TokenKind::Question,
            TokenKind::Pipe,
            TokenKind::Question,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comment_keeps_comma_insertion() {
    assert_eq!(
        kinds("1 // one\n2"),
        vec![
            TokenKind::Int(1),
            TokenKind::Comma,
            TokenKind::Int(2),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_ident_with_bang_before_not_equal() {
    let interner = StringInterner::new();
    let tokens = lex("a!=b", &interner).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(tokens[1].kind, TokenKind::NotEq);
}

#[test]
fn test_ellipsis() {
    assert_eq!(kinds("..."), vec![TokenKind::Ellipsis, TokenKind::Eof]);
}

#[test]
fn test_unexpected_char() {
    assert_eq!(lex_err("1 # 2"), ParseErrorKind::UnexpectedChar('#'));
}

#[test]
fn test_spans() {
    let interner = StringInterner::new();
    let tokens = lex("ab := 'x'", &interner).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(3, 5));
    assert_eq!(tokens[2].span, Span::new(6, 9));
}
