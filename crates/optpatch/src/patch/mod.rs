// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Partial-update patches.
//!
//! An update-info structure lists the members a caller may change, each as an
//! `OptionalValue<T>` (or a nested update-info). [`PatchBuilder`] walks it and
//! emits a [`Patch`]: the ordered `(path, payload)` pairs of the members that
//! are present.
//!
//! # Features
//!
//! - **Schema validation**: once per type, at registration or first build
//! - **Nesting**: nested members extend the path by one segment per level
//! - **Derive**: `#[derive(UpdateInfo)]` generates the manifest and visitor

mod builder;
mod field;
mod schema;

pub use builder::PatchBuilder;
pub use field::{FieldPath, Patch, PatchField};
pub use schema::{MemberKind, MemberSchema, MemberVisitor, UpdateInfo, UpdateSchema};
