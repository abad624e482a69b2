// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure

//! Concurrent use of one cache and one builder
//!
//! Racing first lookups must produce a single descriptor, and a shared
//! `PatchBuilder` must give every thread the same patch.

use optpatch::{
    DescriptorCache, DynamicValue, OptionalValue, PatchBuilder, TypeHandle, TypeIntrospection,
    UpdateInfo,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

#[derive(UpdateInfo)]
struct SensorUpdate {
    label: OptionalValue<String>,
    threshold: OptionalValue<f64>,
    tags: OptionalValue<BTreeMap<String, String>>,
}

#[test]
fn racing_first_lookups_build_one_descriptor() {
    let cache = Arc::new(DescriptorCache::new());
    let handle = TypeHandle::of::<OptionalValue<Vec<i64>>>();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_or_build(handle).expect("container handle")
            })
        })
        .collect();

    let descriptors: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    let first = &descriptors[0];
    assert!(descriptors.iter().all(|d| Arc::ptr_eq(d, first)));
    assert_eq!(cache.len(), 1);

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits + stats.misses, THREADS as u64);
}

#[test]
fn shared_builder_gives_identical_patches() {
    let builder = Arc::new(PatchBuilder::new(TypeIntrospection::default()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let builder = Arc::clone(&builder);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let update = SensorUpdate {
                    label: OptionalValue::empty(),
                    threshold: OptionalValue::of(0.75),
                    tags: OptionalValue::of(BTreeMap::from([(
                        "site".to_string(),
                        "north".to_string(),
                    )])),
                };
                barrier.wait();
                (i, builder.build(&update).expect("build"))
            })
        })
        .collect();

    for handle in handles {
        let (i, patch) = handle.join().expect("thread panicked");
        assert_eq!(patch.paths(), vec!["threshold", "tags"], "thread {}", i);
        assert_eq!(patch.get("threshold"), Some(&DynamicValue::F64(0.75)));
    }

    assert!(builder.is_registered::<SensorUpdate>());
    // String, f64 and the tag map each need one descriptor.
    let cache = builder.introspection().cache();
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.stats().misses, 3);
}

#[test]
fn mixed_payload_types_under_contention() {
    let introspection = TypeIntrospection::default();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let introspection = introspection.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let value = match i % 4 {
                    0 => DynamicValue::I32(i as i32),
                    1 => DynamicValue::Bool(i % 2 == 1),
                    2 => DynamicValue::from(format!("v{}", i)),
                    _ => DynamicValue::F64(i as f64),
                };
                barrier.wait();
                let created = introspection
                    .create_inferred(value.clone())
                    .expect("create");
                let unboxed = introspection.unbox(created.as_ref()).expect("unbox");
                assert_eq!(unboxed, OptionalValue::of(value));
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }
    assert_eq!(introspection.cache().len(), 4);
    assert_eq!(introspection.cache().stats().misses, 4);
}
