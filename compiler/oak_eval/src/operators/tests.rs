#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::EvalErrorKind;

fn eval(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    let mut heap = Heap::new(100);
    evaluate_binary(&mut heap, left, right, op)
}

fn kind(result: EvalResult) -> Option<EvalErrorKind> {
    result.err().map(|e| e.kind)
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn int_stays_int() {
        assert_eq!(eval(Value::Int(2), Value::Int(3), BinaryOp::Add).unwrap(), Value::Int(5));
        assert_eq!(eval(Value::Int(2), Value::Int(3), BinaryOp::Sub).unwrap(), Value::Int(-1));
        assert_eq!(eval(Value::Int(4), Value::Int(3), BinaryOp::Mul).unwrap(), Value::Int(12));
        assert_eq!(eval(Value::Int(7), Value::Int(3), BinaryOp::Mod).unwrap(), Value::Int(1));
    }

    #[test]
    fn exact_division_stays_int() {
        assert_eq!(eval(Value::Int(6), Value::Int(2), BinaryOp::Div).unwrap(), Value::Int(3));
        assert_eq!(
            eval(Value::Int(7), Value::Int(2), BinaryOp::Div).unwrap(),
            Value::Float(3.5)
        );
    }

    #[test]
    fn mixed_widens_to_float() {
        assert_eq!(
            eval(Value::Int(1), Value::Float(0.5), BinaryOp::Add).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            eval(Value::Float(3.0), Value::Int(2), BinaryOp::Mul).unwrap(),
            Value::Float(6.0)
        );
    }

    #[test]
    fn integer_division_by_zero() {
        assert_eq!(
            kind(eval(Value::Int(1), Value::Int(0), BinaryOp::Div)),
            Some(EvalErrorKind::DivisionByZero)
        );
        assert_eq!(
            kind(eval(Value::Int(1), Value::Int(0), BinaryOp::Mod)),
            Some(EvalErrorKind::DivisionByZero)
        );
    }

    #[test]
    fn float_division_by_zero_is_ieee() {
        assert_eq!(
            eval(Value::Float(1.0), Value::Int(0), BinaryOp::Div).unwrap(),
            Value::Float(f64::INFINITY)
        );
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(matches!(
            kind(eval(Value::Int(i64::MAX), Value::Int(1), BinaryOp::Add)),
            Some(EvalErrorKind::IntegerOverflow { .. })
        ));
        assert!(matches!(
            kind(eval(Value::Int(i64::MIN), Value::Int(-1), BinaryOp::Div)),
            Some(EvalErrorKind::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn mismatched_operands() {
        assert!(matches!(
            kind(eval(Value::Int(1), Value::Bool(true), BinaryOp::Add)),
            Some(EvalErrorKind::TypeMismatch { .. })
        ));
    }
}

mod strings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concatenation_allocates() {
        let mut heap = Heap::new(100);
        let a = heap.new_str("foo");
        let b = heap.new_str("bar");

        let joined = evaluate_binary(&mut heap, a, b, BinaryOp::Add).unwrap();
        assert_ne!(joined, a);
        let Value::Str(h) = joined else {
            panic!("expected a string");
        };
        assert_eq!(heap.str(h).unwrap(), b"foobar");
    }

    #[test]
    fn bytewise_ordering() {
        let mut heap = Heap::new(100);
        let a = heap.new_str("apple");
        let b = heap.new_str("banana");

        assert_eq!(
            evaluate_binary(&mut heap, a, b, BinaryOp::Lt).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            evaluate_binary(&mut heap, a, b, BinaryOp::GtEq).unwrap(),
            Value::Bool(false)
        );
    }
}

mod logic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bools_are_logical() {
        assert_eq!(
            eval(Value::Bool(true), Value::Bool(false), BinaryOp::And).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            eval(Value::Bool(true), Value::Bool(false), BinaryOp::Or).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            eval(Value::Bool(true), Value::Bool(true), BinaryOp::Xor).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn ints_are_bitwise() {
        assert_eq!(eval(Value::Int(6), Value::Int(3), BinaryOp::And).unwrap(), Value::Int(2));
        assert_eq!(eval(Value::Int(6), Value::Int(3), BinaryOp::Or).unwrap(), Value::Int(7));
        assert_eq!(eval(Value::Int(6), Value::Int(3), BinaryOp::Xor).unwrap(), Value::Int(5));
    }
}

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_accepts_any_pair() {
        assert_eq!(
            eval(Value::Int(1), Value::Null, BinaryOp::Eq).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            eval(Value::Int(1), Value::Float(1.0), BinaryOp::Eq).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            eval(Value::Null, Value::Empty, BinaryOp::NotEq).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn ordering_widens() {
        assert_eq!(
            eval(Value::Int(1), Value::Float(1.5), BinaryOp::Lt).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            eval(Value::Int(2), Value::Int(2), BinaryOp::LtEq).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn nan_is_unordered() {
        assert_eq!(
            eval(Value::Float(f64::NAN), Value::Int(1), BinaryOp::Lt).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            eval(Value::Float(f64::NAN), Value::Int(1), BinaryOp::GtEq).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn ordering_incompatible_variants() {
        assert!(matches!(
            kind(eval(Value::Bool(true), Value::Bool(false), BinaryOp::Lt)),
            Some(EvalErrorKind::TypeMismatch { .. })
        ));
        assert!(matches!(
            kind(eval(Value::Int(1), Value::Null, BinaryOp::Gt)),
            Some(EvalErrorKind::TypeMismatch { .. })
        ));
    }
}
