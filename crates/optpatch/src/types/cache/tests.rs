// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//! Tests for DescriptorCache.

use super::*;
use crate::optional::OptionalValue;
use crate::types::Typed;
use std::sync::Barrier;
use std::thread;

#[test]
fn cache_hit_reuses_descriptor() {
    let cache = DescriptorCache::new();
    assert!(cache.is_empty());

    let handle = TypeHandle::container::<i32>();
    let first = cache.get_or_build(handle).expect("build");
    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 0);

    let same = cache.get_or_build(handle).expect("hit");
    assert!(Arc::ptr_eq(&first, &same));

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(handle));
}

#[test]
fn rejects_non_container_handles() {
    let cache = DescriptorCache::new();
    for handle in [
        TypeHandle::of::<i32>(),
        TypeHandle::optional_template(),
        TypeHandle::opaque::<Barrier>(),
    ] {
        assert!(matches!(
            cache.get_or_build(handle),
            Err(Error::InvalidArgument(_))
        ));
    }
    assert!(cache.is_empty());
    assert_eq!(cache.stats().misses, 0);
}

#[test]
fn warm_prebuilds() {
    let cache = DescriptorCache::new();
    let desc = cache.warm::<String>().expect("warm");
    assert_eq!(desc.inner(), TypeHandle::of::<String>());
    assert!(cache.contains(OptionalValue::<String>::type_handle()));
    assert!(!cache.contains(TypeHandle::container::<bool>()));
}

#[test]
fn independent_caches_do_not_share_entries() {
    let a = DescriptorCache::new();
    let b = DescriptorCache::new();
    let _ = a.warm::<u64>().expect("warm");
    assert_eq!(a.len(), 1);
    assert!(b.is_empty());
}

#[test]
fn concurrent_first_lookup_builds_once() {
    let cache = Arc::new(DescriptorCache::new());
    let handle = TypeHandle::container::<Vec<Option<u16>>>();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let desc = cache.get_or_build(handle).expect("descriptor");
                assert_eq!(desc.inner(), TypeHandle::of::<Vec<Option<u16>>>());
                Arc::as_ptr(&desc) as usize
            })
        })
        .collect();

    let ptrs: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should succeed"))
        .collect();

    assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(cache.len(), 1);

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, u64::try_from(threads - 1).expect("fits"));
}

#[test]
fn concurrent_hits_are_cheap() {
    let cache = Arc::new(DescriptorCache::new());
    let handles_pool = [
        TypeHandle::container::<i8>(),
        TypeHandle::container::<i16>(),
        TypeHandle::container::<f32>(),
        TypeHandle::container::<char>(),
    ];

    let barrier = Arc::new(Barrier::new(8));
    let mut workers = Vec::new();

    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        workers.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..1_000 {
                let handle = handles_pool[fastrand::usize(..handles_pool.len())];
                let _ = cache.get_or_build(handle).expect("descriptor");
            }
        }));
    }

    for worker in workers {
        worker.join().expect("thread should succeed");
    }

    let stats = cache.stats();
    assert!(stats.misses <= 4);
    assert!(stats.hits > stats.misses);
    assert!(cache.len() <= 4);
}
