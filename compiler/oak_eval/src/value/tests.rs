use super::*;
use crate::errors::EvalErrorKind;
use oak_ir::StringInterner;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

fn text(heap: &Heap, value: Value) -> Vec<u8> {
    match value {
        Value::Str(h) => heap.str(h).map(<[u8]>::to_vec).unwrap_or_default(),
        other => panic!("expected string, got {other:?}"),
    }
}

fn render(heap: &Heap, interner: &StringInterner, value: Value, mode: DisplayMode) -> String {
    display_string(heap, interner, value, mode).unwrap_or_else(|e| panic!("{e}"))
}

fn eq(heap: &Heap, a: Value, b: Value) -> bool {
    equals(heap, a, b).unwrap_or_else(|e| panic!("{e}"))
}

// Access

#[test]
fn test_object_keys_normalize() {
    let interner = StringInterner::new();
    let heap = Heap::new(100);
    let atom = Value::Atom(interner.intern("name"));

    assert_eq!(object_key(&heap, &interner, atom), Ok(b"name".to_vec()));
    assert_eq!(object_key(&heap, &interner, Value::Int(-3)), Ok(b"-3".to_vec()));
    assert!(object_key(&heap, &interner, Value::Bool(true)).is_err());
}

#[test]
fn test_missing_property_is_null() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let object = heap.new_object(FxHashMap::default());
    let list = heap.new_list(vec![Value::Int(1)]);
    let key = heap.new_str("nope");

    assert_eq!(get_property(&mut heap, &interner, object, key), Ok(Value::Null));
    assert_eq!(get_property(&mut heap, &interner, list, Value::Int(1)), Ok(Value::Null));
    assert_eq!(get_property(&mut heap, &interner, list, Value::Int(-1)), Ok(Value::Null));
    assert_eq!(get_property(&mut heap, &interner, list, Value::Int(0)), Ok(Value::Int(1)));
}

#[test]
fn test_string_index_yields_one_byte_string() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let s = heap.new_str("oak");

    let byte = get_property(&mut heap, &interner, s, Value::Int(1))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(text(&heap, byte), b"a".to_vec());
    assert_eq!(get_property(&mut heap, &interner, s, Value::Int(3)), Ok(Value::Null));
}

#[test]
fn test_property_on_int_is_type_mismatch() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let err = get_property(&mut heap, &interner, Value::Int(1), Value::Int(0)).err();
    assert!(matches!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::TypeMismatch { .. })
    ));
}

#[test]
fn test_set_property_list_bounds() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let list = heap.new_list(vec![Value::Int(1)]);

    assert_eq!(
        set_property(&mut heap, &interner, list, Value::Int(0), Value::Int(5)),
        Ok(list)
    );
    assert_eq!(
        set_property(&mut heap, &interner, list, Value::Int(1), Value::Int(6)),
        Ok(list)
    );
    let err = set_property(&mut heap, &interner, list, Value::Int(5), Value::Null).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::IndexOutOfBounds { index: 5, len: 2 })
    );

    let Value::List(h) = list else { unreachable!() };
    assert_eq!(heap.list(h), Ok(&[Value::Int(5), Value::Int(6)][..]));
}

#[test]
fn test_set_property_string_overwrites_and_extends() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let target = heap.new_str("abc");
    let patch = heap.new_str("xyz");

    let result = set_property(&mut heap, &interner, target, Value::Int(2), patch);
    assert_eq!(result, Ok(target));
    assert_eq!(text(&heap, target), b"abxyz".to_vec());
}

#[test]
fn test_set_property_object_insert() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let object = heap.new_object(FxHashMap::default());
    let key = Value::Atom(interner.intern("a"));

    set_property(&mut heap, &interner, object, key, Value::Int(1))
        .unwrap_or_else(|e| panic!("{e}"));
    let by_string = heap.new_str("a");
    assert_eq!(
        get_property(&mut heap, &interner, object, by_string),
        Ok(Value::Int(1))
    );
}

#[test]
fn test_push_string_returns_same_reference() {
    let mut heap = Heap::new(100);
    let s = heap.new_str("Hello ");
    let world = heap.new_str("World!");

    assert_eq!(push(&mut heap, s, world), Ok(s));
    assert_eq!(text(&heap, s), b"Hello World!".to_vec());
}

#[test]
fn test_push_rejects_non_containers() {
    let mut heap = Heap::new(100);
    let s = heap.new_str("a");

    assert!(push(&mut heap, Value::Int(1), Value::Int(2)).is_err());
    assert!(push(&mut heap, s, Value::Int(2)).is_err());
}

// Clone

#[test]
fn test_clone_is_independent() {
    let mut heap = Heap::new(100);
    let inner = heap.new_list(vec![Value::Int(1)]);
    let outer = heap.new_list(vec![inner]);

    let copy = deep_clone(&mut heap, outer).unwrap_or_else(|e| panic!("{e}"));
    assert_ne!(copy, outer);
    assert!(eq(&heap, copy, outer));

    let Value::List(copy_handle) = copy else { unreachable!() };
    let copied_inner = heap.list(copy_handle).map(|items| items[0]).unwrap_or(Value::Null);
    push(&mut heap, copied_inner, Value::Int(2)).unwrap_or_else(|e| panic!("{e}"));

    let Value::List(inner_handle) = inner else { unreachable!() };
    assert_eq!(heap.list(inner_handle).map(<[Value]>::len), Ok(1));
}

#[test]
fn test_clone_preserves_cycles() {
    let mut heap = Heap::new(100);
    let list = heap.new_list(vec![Value::Int(1)]);
    push(&mut heap, list, list).unwrap_or_else(|e| panic!("{e}"));

    let copy = deep_clone(&mut heap, list).unwrap_or_else(|e| panic!("{e}"));
    let Value::List(h) = copy else { unreachable!() };
    assert_eq!(heap.list(h).map(|items| items[1]), Ok(copy));
}

#[test]
fn test_clone_leaves_primitives() {
    let mut heap = Heap::new(100);
    assert_eq!(deep_clone(&mut heap, Value::Int(4)), Ok(Value::Int(4)));
    assert_eq!(heap.live_count(), 0);
}

// Equality

#[test]
fn test_numeric_equality_widens() {
    let heap = Heap::new(100);
    assert!(eq(&heap, Value::Int(1), Value::Float(1.0)));
    assert!(!eq(&heap, Value::Int(1), Value::Float(1.5)));
    assert!(!eq(&heap, Value::Int(1), Value::Bool(true)));
}

#[test]
fn test_structural_equality() {
    let mut heap = Heap::new(100);
    let a = heap.new_str("x");
    let b = heap.new_str("x");
    let la = heap.new_list(vec![a, Value::Int(1)]);
    let lb = heap.new_list(vec![b, Value::Int(1)]);
    let lc = heap.new_list(vec![b]);

    assert!(eq(&heap, la, lb));
    assert!(!eq(&heap, la, lc));

    let wildcards = heap.new_list(vec![Value::Empty, Value::Empty]);
    assert!(eq(&heap, la, wildcards));
}

#[test]
fn test_object_equality_ignores_order() {
    let mut heap = Heap::new(100);
    let mut first = FxHashMap::default();
    first.insert(b"a".to_vec(), Value::Int(1));
    first.insert(b"b".to_vec(), Value::Int(2));
    let mut second = FxHashMap::default();
    second.insert(b"b".to_vec(), Value::Int(2));
    second.insert(b"a".to_vec(), Value::Int(1));
    let x = heap.new_object(first);
    let y = heap.new_object(second);
    let z = heap.new_object(FxHashMap::default());

    assert!(eq(&heap, x, y));
    assert!(!eq(&heap, x, z));
}

#[test]
fn test_cyclic_equality_terminates() {
    let mut heap = Heap::new(100);
    let a = heap.new_list(Vec::new());
    let b = heap.new_list(Vec::new());
    push(&mut heap, a, a).unwrap_or_else(|e| panic!("{e}"));
    push(&mut heap, b, b).unwrap_or_else(|e| panic!("{e}"));

    assert!(eq(&heap, a, b));
}

// Display

#[test]
fn test_display_plain_and_debug() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let s = heap.new_str("hi");
    let atom = Value::Atom(interner.intern("ok"));

    assert_eq!(render(&heap, &interner, s, DisplayMode::Plain), "hi");
    assert_eq!(render(&heap, &interner, s, DisplayMode::Debug), "'hi'");
    assert_eq!(render(&heap, &interner, atom, DisplayMode::Plain), "ok");
    assert_eq!(render(&heap, &interner, atom, DisplayMode::Debug), ":ok");
    assert_eq!(render(&heap, &interner, Value::Null, DisplayMode::Plain), "?");
    assert_eq!(render(&heap, &interner, Value::Float(3.5), DisplayMode::Plain), "3.5");
}

#[test]
fn test_display_containers() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let s = heap.new_str("x");
    let list = heap.new_list(vec![Value::Int(1), s, Value::Bool(true)]);
    let mut map = FxHashMap::default();
    map.insert(b"b".to_vec(), list);
    map.insert(b"a".to_vec(), Value::Null);
    let object = heap.new_object(map);

    assert_eq!(
        render(&heap, &interner, object, DisplayMode::Plain),
        "{a: ?, b: [1, 'x', true]}"
    );
}

#[test]
fn test_display_cycles() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let list = heap.new_list(vec![Value::Int(1)]);
    push(&mut heap, list, list).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(render(&heap, &interner, list, DisplayMode::Plain), "[1, [...]]");
}

#[test]
fn test_display_escapes_quotes() {
    let interner = StringInterner::new();
    let mut heap = Heap::new(100);
    let s = heap.new_str("it's\n");
    assert_eq!(render(&heap, &interner, s, DisplayMode::Debug), "'it\\'s\\n'");
}

// Properties

mod proptest_values {
    use super::super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Shape {
        Null,
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(Vec<u8>),
        List(Vec<Shape>),
        Object(Vec<(String, Shape)>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            Just(Shape::Null),
            any::<bool>().prop_map(Shape::Bool),
            any::<i64>().prop_map(Shape::Int),
            (-1.0e6..1.0e6f64).prop_map(Shape::Float),
            proptest::collection::vec(any::<u8>(), 0..8).prop_map(Shape::Str),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Shape::List),
                proptest::collection::vec(("[a-c]", inner), 0..4).prop_map(Shape::Object),
            ]
        })
    }

    fn build(heap: &mut Heap, shape: &Shape) -> Value {
        match shape {
            Shape::Null => Value::Null,
            Shape::Bool(b) => Value::Bool(*b),
            Shape::Int(n) => Value::Int(*n),
            Shape::Float(f) => Value::Float(*f),
            Shape::Str(bytes) => heap.new_str(bytes.clone()),
            Shape::List(items) => {
                let items = items.iter().map(|item| build(heap, item)).collect();
                heap.new_list(items)
            }
            Shape::Object(entries) => {
                let mut map = ObjectMap::default();
                for (key, item) in entries {
                    let item = build(heap, item);
                    map.insert(key.as_bytes().to_vec(), item);
                }
                heap.new_object(map)
            }
        }
    }

    proptest! {
        #[test]
        fn empty_equals_every_value(shape in shape()) {
            let mut heap = Heap::new(1000);
            let value = build(&mut heap, &shape);
            prop_assert_eq!(equals(&heap, value, Value::Empty), Ok(true));
            prop_assert_eq!(equals(&heap, Value::Empty, value), Ok(true));
        }

        #[test]
        fn clone_is_equal_and_independent(
            items in proptest::collection::vec(shape(), 0..6),
            extra in shape(),
        ) {
            let mut heap = Heap::new(1000);
            let list = build(&mut heap, &Shape::List(items));
            let Value::List(handle) = list else {
                return Err(TestCaseError::fail("built a non-list"));
            };
            let before = heap.list(handle).map(<[Value]>::len);

            let copy = deep_clone(&mut heap, list).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(equals(&heap, copy, list), Ok(true));

            let extra = build(&mut heap, &extra);
            prop_assert_eq!(push(&mut heap, copy, extra), Ok(copy));
            prop_assert_eq!(heap.list(handle).map(<[Value]>::len), before);
        }
    }
}
