// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Erased payloads.
//!
//! Optional containers hand their payloads across the type-erased boundary as
//! [`DynamicValue`]. [`PatchValue`] is implemented by every type that may sit
//! inside an [`OptionalValue`](crate::OptionalValue) and defines which dynamic
//! values are assignable to it.
//!
//! # Example
//!
//! ```rust
//! use optpatch::{DynamicValue, PatchValue};
//!
//! let payload = 30i32.into_dynamic();
//! assert_eq!(payload, DynamicValue::I32(30));
//!
//! // Assignability is exact: an i64 payload does not fit an i32.
//! assert!(i32::from_dynamic(DynamicValue::I64(30)).is_err());
//! ```

mod convert;
#[cfg(feature = "serde")]
mod json;
mod value;

pub use convert::{PatchValue, ValueMismatch};
pub use value::DynamicValue;
