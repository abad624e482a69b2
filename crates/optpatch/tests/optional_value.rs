// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::redundant_clone)] // Copy-semantics assertions

//! OptionalValue container semantics
//!
//! Presence, payload access, copy independence and the equality rules,
//! including the cross-type rule checked through `eq_reflect`.

use optpatch::{Error, OptionalValue, Reflect};

#[test]
fn empty_has_no_value() {
    let v = OptionalValue::<i32>::empty();
    assert!(!v.has_value());
    assert_eq!(v.get(), Err(Error::EmptyValueAccess));
}

#[test]
fn empty_instances_are_independent() {
    let mut a = OptionalValue::<String>::empty();
    let b = OptionalValue::<String>::empty();
    a.set("changed".into());
    assert!(a.has_value());
    assert!(!b.has_value());
}

#[test]
fn of_holds_value() {
    let v = OptionalValue::of(10);
    assert!(v.has_value());
    assert_eq!(*v.get().expect("present"), 10);
}

#[test]
fn set_replaces_payload() {
    let mut v = OptionalValue::of(1.5f64);
    v.set(2.5);
    assert_eq!(v.into_inner(), Ok(2.5));
}

#[test]
fn get_mut_edits_in_place() {
    let mut v = OptionalValue::of(vec![1, 2]);
    v.get_mut().expect("present").push(3);
    assert_eq!(v.as_option(), Some(&vec![1, 2, 3]));

    let mut empty = OptionalValue::<Vec<i32>>::empty();
    assert_eq!(empty.get_mut(), Err(Error::EmptyValueAccess));
}

#[test]
fn clones_evolve_independently() {
    let original = OptionalValue::of("a".to_string());
    let mut copy = original.clone();
    copy.set("b".to_string());
    assert_eq!(original.get().map(String::as_str), Ok("a"));
    assert_eq!(copy.get().map(String::as_str), Ok("b"));
}

#[test]
fn equality_same_type() {
    assert_eq!(OptionalValue::<i32>::empty(), OptionalValue::<i32>::empty());
    assert_eq!(OptionalValue::of(10), OptionalValue::of(10));
    assert_ne!(OptionalValue::of(10), OptionalValue::of(11));
    assert_ne!(OptionalValue::of(10), OptionalValue::empty());
}

#[test]
fn equality_across_types_is_false() {
    let empty_int = OptionalValue::<i32>::empty();
    let empty_string = OptionalValue::<String>::empty();
    assert!(!empty_int.eq_reflect(&empty_string));
    assert!(empty_int.eq_reflect(&OptionalValue::<i32>::empty()));

    let ten = OptionalValue::of(10i32);
    assert!(ten.eq_reflect(&OptionalValue::of(10i32)));
    assert!(!ten.eq_reflect(&OptionalValue::of(10i64)));
}

#[test]
fn never_equal_to_bare_payload() {
    let ten = OptionalValue::of(10i32);
    assert!(!ten.eq_reflect(&10i32));

    let boxed: Box<dyn Reflect> = Box::new(10i32);
    assert!(!ten.eq_reflect(boxed.as_ref()));
}

#[test]
fn from_payload_is_only_a_convenience() {
    let v: OptionalValue<bool> = true.into();
    assert_eq!(v, OptionalValue::of(true));

    let absent: OptionalValue<bool> = None.into();
    assert_eq!(absent, OptionalValue::empty());
}

#[test]
fn nullable_payload_is_present() {
    let v = OptionalValue::<Option<String>>::of(None);
    assert!(v.has_value());
    assert_ne!(v, OptionalValue::empty());
}

#[test]
fn default_is_empty() {
    let v: OptionalValue<u64> = OptionalValue::default();
    assert!(!v.has_value());
    assert_eq!(v.get_or(7), 7);
}

#[test]
fn map_preserves_presence() {
    assert_eq!(OptionalValue::of(2).map(|v| v * 10), OptionalValue::of(20));
    assert_eq!(
        OptionalValue::<i32>::empty().map(|v| v * 10),
        OptionalValue::empty()
    );
}
