// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # optpatch - type-erased optional fields and partial updates
//!
//! A caller updating a stored entity sets only the fields it wants to change.
//! Each updatable field is an [`OptionalValue<T>`]: absent means "leave it
//! alone", present means "store this". [`PatchBuilder`] reduces an
//! update-info structure to the ordered `(path, payload)` pairs a storage
//! layer applies, without per-entity update code.
//!
//! ## Quick Start
//!
//! ```rust
//! use optpatch::{DynamicValue, OptionalValue, PatchBuilder, Result, TypeIntrospection, UpdateInfo};
//!
//! #[derive(UpdateInfo)]
//! struct UserUpdate {
//!     name: OptionalValue<String>,
//!     age: OptionalValue<i32>,
//!     active: OptionalValue<bool>,
//! }
//!
//! fn main() -> Result<()> {
//!     let builder = PatchBuilder::new(TypeIntrospection::default());
//!     builder.register::<UserUpdate>()?;
//!
//!     let update = UserUpdate {
//!         name: OptionalValue::empty(),
//!         age: OptionalValue::of(30),
//!         active: true.into(),
//!     };
//!
//!     let patch = builder.build(&update)?;
//!     assert_eq!(patch.paths(), vec!["age", "active"]);
//!     assert_eq!(patch.get("age"), Some(&DynamicValue::I32(30)));
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`OptionalValue`] | Absent or present-with-value container |
//! | [`TypeIntrospection`] | Type-erased queries, unboxing, mutation and construction of containers |
//! | [`DescriptorCache`] | Builds each container's operation bundle once; injected, never global |
//! | [`PatchBuilder`] | Validates update-info schemas and emits [`Patch`]es |
//! | [`PatchSink`] | Storage-side consumer of patches |
//!
//! ## Modules Overview
//!
//! - [`optional`] - the container type
//! - [`dynamic`] - erased payloads and payload conversions
//! - [`types`] - type handles, descriptors, cache and introspection
//! - [`patch`] - update-info contract and patch building
//! - [`storage`] - storage boundary and an in-memory reference store
//! - [`config`] - builder configuration

// Allow the derive macro to work inside this crate's tests
extern crate self as optpatch;

/// Patch builder configuration (path separator, depth limit).
pub mod config;
/// Erased payloads and the `PatchValue` conversion trait.
pub mod dynamic;
/// Error type and `Result` alias.
pub mod error;
/// The `OptionalValue<T>` container.
pub mod optional;
/// Update-info contract, field paths and `PatchBuilder`.
pub mod patch;
/// Storage boundary (`PatchSink`, `update_entity`, `MemoryStore`).
pub mod storage;
/// Runtime type handles, container descriptors, cache and introspection.
pub mod types;

pub use config::{PatchConfig, PatchConfigBuilder, DEFAULT_MAX_DEPTH, DEFAULT_PATH_SEPARATOR};
pub use dynamic::{DynamicValue, PatchValue, ValueMismatch};
pub use error::{Error, Result};
pub use optional::OptionalValue;
pub use patch::{
    FieldPath, MemberKind, MemberSchema, MemberVisitor, Patch, PatchBuilder, PatchField,
    UpdateInfo, UpdateSchema,
};
#[cfg(feature = "serde")]
pub use storage::MemoryStore;
pub use storage::{update_entity, PatchSink, UpdateOutcome};
pub use types::{
    ContainerDescriptor, DescriptorCache, LookupStats, Reflect, TypeHandle, TypeIntrospection,
    Typed,
};

/// Derive macro for update-info structures; see [`UpdateInfo`].
pub use optpatch_codegen::UpdateInfo;
