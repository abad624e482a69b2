// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type handles, container descriptors and the introspection service.
//!
//! Provides `TypeHandle` and the `Reflect` trait for passing values without
//! their static type, `DescriptorCache` for caching the per-container
//! operation bundle, and `TypeIntrospection` on top of both.

pub mod cache;
pub mod descriptor;
pub mod handle;
pub mod introspect;

pub use cache::{DescriptorCache, LookupStats};
pub use descriptor::ContainerDescriptor;
pub use handle::{Reflect, TypeHandle, Typed};
pub use introspect::TypeIntrospection;
