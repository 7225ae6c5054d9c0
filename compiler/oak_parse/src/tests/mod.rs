//! Parser tests.
//!
//! Trees are compared through a compact s-expression rendering so that a
//! test reads like the source it checks.

mod parser;

use oak_ir::{ExprArena, ExprId, ExprKind, Pattern, PatternId, Program, StringInterner};

use crate::{parse, ParseErrorKind};

pub(super) fn parse_ok(source: &str) -> (Program, StringInterner) {
    let interner = StringInterner::new();
    match parse(source, &interner) {
        Ok(program) => (program, interner),
        Err(e) => panic!("parse failed for {source:?}: {e} at {:?}", e.span),
    }
}

pub(super) fn parse_err(source: &str) -> ParseErrorKind {
    let interner = StringInterner::new();
    match parse(source, &interner) {
        Ok(program) => panic!("expected parse error for {source:?}, got {program:?}"),
        Err(e) => e.kind,
    }
}

/// Render every top-level expression, one per entry.
pub(super) fn sexprs(source: &str) -> Vec<String> {
    let (program, interner) = parse_ok(source);
    let printer = Printer {
        arena: &program.arena,
        interner: &interner,
    };
    program.body.iter().map(|&id| printer.expr(id)).collect()
}

/// Render the single top-level expression.
pub(super) fn sexpr(source: &str) -> String {
    let mut all = sexprs(source);
    assert_eq!(all.len(), 1, "expected one expression in {source:?}: {all:?}");
    all.remove(0)
}

struct Printer<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
}

impl Printer<'_> {
    fn list(&self, ids: &[ExprId]) -> String {
        ids.iter().map(|&id| self.expr(id)).collect::<Vec<_>>().join(" ")
    }

    fn expr(&self, id: ExprId) -> String {
        match &self.arena.get_expr(id).kind {
            ExprKind::Null => "?".to_string(),
            ExprKind::Empty => "_".to_string(),
            ExprKind::Bool(b) => b.to_string(),
            ExprKind::Int(n) => n.to_string(),
            ExprKind::Float(f) => format!("{f:?}"),
            ExprKind::Str(s) => format!("'{}'", String::from_utf8_lossy(self.arena.get_str(*s))),
            ExprKind::Atom(name) => format!(":{}", self.interner.lookup(*name)),
            ExprKind::Ident(name) => self.interner.lookup(*name).to_string(),
            ExprKind::List(r) => format!("[{}]", self.list(self.arena.get_expr_list(*r))),
            ExprKind::Object(r) => {
                let entries: Vec<String> = self
                    .arena
                    .get_entries(*r)
                    .iter()
                    .map(|e| format!("{}: {}", self.expr(e.key), self.expr(e.value)))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            ExprKind::Block(r) => format!("(do {})", self.list(self.arena.get_expr_list(*r))),
            ExprKind::Function(f) => {
                let def = self.arena.get_function(*f);
                let mut params: Vec<String> = self
                    .arena
                    .get_params(def.params)
                    .iter()
                    .map(|&p| self.interner.lookup(p).to_string())
                    .collect();
                if let Some(rest) = def.rest {
                    params.push(format!("{}...", self.interner.lookup(rest)));
                }
                let name = def.name.map_or("", |n| self.interner.lookup(n));
                format!("(fn {name}({}) {})", params.join(" "), self.expr(def.body))
            }
            ExprKind::Call { callee, args } => {
                let args = self.arena.get_expr_list(*args);
                if args.is_empty() {
                    format!("({})", self.expr(*callee))
                } else {
                    format!("({} {})", self.expr(*callee), self.list(args))
                }
            }
            ExprKind::Match { subjects, clauses } => {
                let clauses: Vec<String> = self
                    .arena
                    .get_clauses(*clauses)
                    .iter()
                    .map(|c| {
                        let pats: Vec<String> = self
                            .arena
                            .get_pattern_list(c.patterns)
                            .iter()
                            .map(|&p| self.pattern(p))
                            .collect();
                        format!("{} -> {}", pats.join(" "), self.expr(c.body))
                    })
                    .collect();
                format!(
                    "(if {} {{{}}})",
                    self.list(self.arena.get_expr_list(*subjects)),
                    clauses.join(", ")
                )
            }
            ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), self.expr(*operand)),
            ExprKind::Binary { op, left, right } => {
                format!("({} {} {})", op.as_symbol(), self.expr(*left), self.expr(*right))
            }
            ExprKind::Define { target, value } => {
                format!("(:= {} {})", self.expr(*target), self.expr(*value))
            }
            ExprKind::Assign { name, value } => {
                format!("(<- {} {})", self.interner.lookup(*name), self.expr(*value))
            }
            ExprKind::Push { target, value } => {
                format!("(<< {} {})", self.expr(*target), self.expr(*value))
            }
            ExprKind::Property { object, key } => {
                format!("(. {} {})", self.expr(*object), self.expr(*key))
            }
        }
    }

    fn pattern(&self, id: PatternId) -> String {
        match *self.arena.get_pattern(id) {
            Pattern::Expr(e) => self.expr(e),
            Pattern::Empty { bind: None } => "_".to_string(),
            Pattern::Empty { bind: Some(name) } => format!("{}@_", self.interner.lookup(name)),
            Pattern::Bind { name, pattern } => {
                format!("{}@{}", self.interner.lookup(name), self.pattern(pattern))
            }
            Pattern::List(r) => {
                let parts: Vec<String> = self
                    .arena
                    .get_pattern_list(r)
                    .iter()
                    .map(|&p| self.pattern(p))
                    .collect();
                format!("[{}]", parts.join(" "))
            }
            Pattern::Object(r) => {
                let parts: Vec<String> = self
                    .arena
                    .get_pattern_entries(r)
                    .iter()
                    .map(|e| {
                        format!(
                            "{}: {}",
                            String::from_utf8_lossy(self.arena.get_str(e.key)),
                            self.pattern(e.pattern)
                        )
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }
}
