// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Storage boundary
//!
//! Defines the trait a storage backend implements to consume patches.
//! Translating a [`Patch`] into a native update command, and deciding what a
//! null payload means there, belongs to the backend.
//!
//! # Implementations
//!
//! - `MemoryStore` -- JSON documents in memory (feature `serde`)

#[cfg(feature = "serde")]
mod memory;

#[cfg(feature = "serde")]
pub use memory::MemoryStore;

use crate::error::Result;
use crate::patch::{Patch, PatchBuilder, UpdateInfo};

/// A backend able to apply a patch to one stored entity.
pub trait PatchSink {
    /// Apply every field of `patch` to the entity stored under `key`.
    ///
    /// Returns `false` when no entity matched. Backend failures are reported
    /// as [`Error::Storage`](crate::Error::Storage).
    fn apply_patch(&self, key: &str, patch: &Patch) -> Result<bool>;
}

/// Result of [`update_entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing was specified; the sink was not called.
    Skipped,
    /// The entity existed and the patch was applied.
    Matched,
    /// No entity is stored under the key.
    NotFound,
}

/// Build the patch for `info` and apply it to `key` in `sink`.
///
/// An empty patch never reaches the sink.
pub fn update_entity<T, S>(
    builder: &PatchBuilder,
    sink: &S,
    key: &str,
    info: &T,
) -> Result<UpdateOutcome>
where
    T: UpdateInfo,
    S: PatchSink + ?Sized,
{
    let patch = builder.build(info)?;
    if patch.is_empty() {
        log::debug!("[update_entity] empty patch for {}, skipping storage", key);
        return Ok(UpdateOutcome::Skipped);
    }

    if sink.apply_patch(key, &patch)? {
        Ok(UpdateOutcome::Matched)
    } else {
        Ok(UpdateOutcome::NotFound)
    }
}
