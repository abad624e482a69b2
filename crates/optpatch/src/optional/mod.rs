// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Optional-value container.
//!
//! [`OptionalValue<T>`] distinguishes "not specified" from "specified", which
//! is what a partial update needs: only the members a caller explicitly set
//! are written back.
//!
//! # Example
//!
//! ```rust
//! use optpatch::OptionalValue;
//!
//! let mut age = OptionalValue::<i32>::empty();
//! assert!(!age.has_value());
//!
//! age.set(30);
//! assert_eq!(age.get().copied(), Ok(30));
//! assert_eq!(age, OptionalValue::of(30));
//! ```

#[cfg(feature = "serde")]
mod serde_impl;

use crate::dynamic::PatchValue;
use crate::error::{Error, Result};
use crate::types::{Reflect, TypeHandle, Typed};
use std::fmt;

/// A value that is either absent or present with a payload of type `T`.
///
/// Equality between two containers of the same `T` compares presence and
/// payload. Containers of different `T` are never equal, even when both are
/// absent; use [`eq_reflect`](Self::eq_reflect) to compare across types.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionalValue<T> {
    value: Option<T>,
}

impl<T> OptionalValue<T> {
    /// A fresh absent container.
    #[must_use]
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// A present container holding `value`.
    #[must_use]
    pub const fn of(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the payload.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyValueAccess`] if absent.
    pub fn get(&self) -> Result<&T> {
        self.value.as_ref().ok_or(Error::EmptyValueAccess)
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.value.as_mut().ok_or(Error::EmptyValueAccess)
    }

    /// Consume the container and return its payload.
    pub fn into_inner(self) -> Result<T> {
        self.value.ok_or(Error::EmptyValueAccess)
    }

    /// Store `value`, making the container present.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Back to absent.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Remove and return the payload, leaving the container absent.
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn as_option(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }

    /// Payload, or `default` when absent.
    pub fn get_or(self, default: T) -> T {
        self.value.unwrap_or(default)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> OptionalValue<U> {
        OptionalValue {
            value: self.value.map(f),
        }
    }
}

impl<T: PatchValue + PartialEq> OptionalValue<T> {
    /// Compare against a value of unknown type.
    ///
    /// True only if `other` is an `OptionalValue<T>` of the same `T` and the
    /// two are equal. A bare `T` never compares equal.
    pub fn eq_reflect(&self, other: &dyn Reflect) -> bool {
        other
            .downcast_ref::<OptionalValue<T>>()
            .is_some_and(|other| self == other)
    }
}

impl<T> Default for OptionalValue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for OptionalValue<T> {
    fn from(value: T) -> Self {
        Self::of(value)
    }
}

impl<T> From<Option<T>> for OptionalValue<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

impl<T> From<OptionalValue<T>> for Option<T> {
    fn from(value: OptionalValue<T>) -> Self {
        value.value
    }
}

impl<T: fmt::Debug> fmt::Debug for OptionalValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => f.debug_tuple("Of").field(v).finish(),
            None => f.write_str("Empty"),
        }
    }
}

impl<T: PatchValue> Typed for OptionalValue<T> {
    fn type_handle() -> TypeHandle {
        TypeHandle::container::<T>()
    }
}
