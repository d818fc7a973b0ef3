use std::{collections::hash_map::DefaultHasher, hash::BuildHasher as _};

use rand::Rng as _;

use super::*;
use crate::testonly::{Book, Coordinate};

fn hash_of(v: &Value) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

#[test]
fn equal_contents_compare_and_hash_equal() {
    let rng = &mut rand::thread_rng();
    for _ in 0..16 {
        let c: Coordinate = rng.gen();
        let a = Value::new(c.clone());
        let b = Value::new(Coordinate::new(c.x, c.y));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}

#[test]
fn different_types_never_compare_equal() {
    assert_ne!(Value::new(1_i64), Value::new(1_i32));
    assert_ne!(Value::from("a"), Value::new('a'));
}

#[test]
fn downcast() {
    let v = Value::new(Book::new("Wild Potions"));
    assert!(v.is::<Book>());
    assert!(!v.is::<String>());
    assert_eq!(v.downcast_ref::<Book>().unwrap().title, "Wild Potions");
    assert_eq!(v.downcast_ref::<String>(), None);
    assert_eq!(v.payload_type(), PayloadType::of::<Book>());
    assert!(v.payload_type().is::<Book>());
}

#[test]
fn works_as_hash_map_key() {
    let state = std::collections::hash_map::RandomState::new();
    let a = Value::from("copy");
    let b = Value::from("copy".to_owned());
    assert_eq!(state.hash_one(&a), state.hash_one(&b));
}

#[test]
fn value_is_never_wrapped_twice() {
    let inner = Value::from("x");
    let outer = Value::new(inner.clone());
    assert_eq!(outer, inner);
    assert!(outer.is::<String>());
    assert_eq!(outer.payload_type(), PayloadType::of::<String>());
}
