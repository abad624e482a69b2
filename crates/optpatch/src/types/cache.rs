// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of container descriptors.
//!
//! The DescriptorCache ensures each closed `OptionalValue<T>` type gets its
//! [`ContainerDescriptor`] built exactly once. Lookups take the shared lock;
//! a miss takes the write lock, re-checks, and builds inside the critical
//! section. Entries are immutable and never evicted: the set of closed
//! container types in a program is fixed at compile time.
//!
//! The cache is an ordinary value. Own one per application (usually behind an
//! `Arc`) and hand it to [`TypeIntrospection`](super::TypeIntrospection);
//! tests create independent instances.

use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::descriptor::ContainerDescriptor;
use super::handle::TypeHandle;
use crate::dynamic::PatchValue;
use crate::error::{Error, Result};

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
    pub last_miss_ns: u64,
}

/// Append-only concurrent map from closed container type to descriptor.
#[derive(Default)]
pub struct DescriptorCache {
    inner: RwLock<HashMap<TypeId, Arc<ContainerDescriptor>>>,
    stats: RwLock<LookupStats>,
}

impl DescriptorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for a closed container handle, building it on first use.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `handle` is not a closed container type
    /// (this includes the unbound template).
    pub fn get_or_build(&self, handle: TypeHandle) -> Result<Arc<ContainerDescriptor>> {
        let build = handle.descriptor_thunk().ok_or_else(|| {
            Error::InvalidArgument(format!("{} is not a closed OptionalValue type", handle))
        })?;
        let key = handle.id();

        if let Some(hit) = self.try_peek(&key) {
            self.record_hit();
            return Ok(hit);
        }

        let mut cache = self.inner.write();
        if let Some(hit) = cache.get(&key) {
            self.record_hit();
            return Ok(Arc::clone(hit));
        }

        let start = Instant::now();
        let built = Arc::new(build());
        debug_assert_eq!(
            built.container(),
            handle,
            "descriptor must describe the handle it was built for"
        );
        cache.insert(key, Arc::clone(&built));
        drop(cache);

        self.record_miss(start);
        log::debug!(
            "[DescriptorCache] built descriptor for {} (inner {})",
            handle,
            built.inner()
        );
        Ok(built)
    }

    /// Pre-build the descriptor for `OptionalValue<T>`.
    pub fn warm<T: PatchValue>(&self) -> Result<Arc<ContainerDescriptor>> {
        self.get_or_build(TypeHandle::container::<T>())
    }

    /// True if a descriptor for `handle` has been built.
    pub fn contains(&self, handle: TypeHandle) -> bool {
        self.inner.read().contains_key(&handle.id())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }

    fn try_peek(&self, key: &TypeId) -> Option<Arc<ContainerDescriptor>> {
        let cache = self.inner.read();
        cache.get(key).map(Arc::clone)
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self, start: Instant) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
        stats.last_miss_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    }
}

impl std::fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests;
