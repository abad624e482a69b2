// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Container descriptor: the erased operation bundle for one closed
//! `OptionalValue<T>` type.
//!
//! Each thunk is a monomorphised function taking `&dyn Any`; it returns
//! `None` (or `InvalidArgument`) when the instance is not the descriptor's
//! container type.

use super::handle::{Reflect, TypeHandle};
use crate::dynamic::{DynamicValue, PatchValue};
use crate::error::{Error, Result};
use crate::optional::OptionalValue;
use std::any::{type_name, Any};
use std::fmt;

/// Presence, payload read, payload write and construction for one closed
/// container type.
pub struct ContainerDescriptor {
    container: TypeHandle,
    inner: TypeHandle,
    nullable: bool,
    has_value: fn(&dyn Any) -> Option<bool>,
    get: fn(&dyn Any) -> Option<OptionalValue<DynamicValue>>,
    set: fn(&mut dyn Any, DynamicValue) -> Option<Result<()>>,
    construct: fn(Option<DynamicValue>) -> Result<Box<dyn Reflect>>,
}

impl ContainerDescriptor {
    /// Build the descriptor for `OptionalValue<T>`.
    #[must_use]
    pub fn of<T: PatchValue>() -> Self {
        Self {
            container: TypeHandle::container::<T>(),
            inner: T::type_handle(),
            nullable: T::NULLABLE,
            has_value: has_value::<T>,
            get: get::<T>,
            set: set::<T>,
            construct: construct::<T>,
        }
    }

    /// Handle of the closed container type.
    pub fn container(&self) -> TypeHandle {
        self.container
    }

    /// Handle of the payload type `T`.
    pub fn inner(&self) -> TypeHandle {
        self.inner
    }

    /// Whether `DynamicValue::Null` is an acceptable payload.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn has_value(&self, instance: &dyn Reflect) -> Result<bool> {
        (self.has_value)(instance.as_any()).ok_or_else(|| self.mismatch(instance))
    }

    /// Presence and payload of `instance`, payload erased.
    pub fn get(&self, instance: &dyn Reflect) -> Result<OptionalValue<DynamicValue>> {
        (self.get)(instance.as_any()).ok_or_else(|| self.mismatch(instance))
    }

    /// Replace the payload of `instance` in place.
    pub fn set(&self, instance: &mut dyn Reflect, value: DynamicValue) -> Result<()> {
        let handle = instance.reflect_handle();
        match (self.set)(instance.as_any_mut(), value) {
            Some(result) => result,
            None => Err(Error::InvalidArgument(format!(
                "{} is not a {}",
                handle, self.container
            ))),
        }
    }

    /// New boxed container, present iff `value` is `Some`.
    pub fn construct(&self, value: Option<DynamicValue>) -> Result<Box<dyn Reflect>> {
        (self.construct)(value)
    }

    fn mismatch(&self, instance: &dyn Reflect) -> Error {
        Error::InvalidArgument(format!(
            "{} is not a {}",
            instance.reflect_handle(),
            self.container
        ))
    }
}

impl fmt::Debug for ContainerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerDescriptor")
            .field("container", &self.container)
            .field("inner", &self.inner)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

/// Convert an erased payload to `T`, enforcing nullability first.
pub(crate) fn convert<T: PatchValue>(value: DynamicValue) -> Result<T> {
    if value.is_null() && !T::NULLABLE {
        return Err(Error::InvalidState(format!(
            "null is not a valid {} payload",
            type_name::<T>()
        )));
    }
    T::from_dynamic(value).map_err(|mismatch| {
        Error::InvalidState(format!(
            "value not assignable to {}: {}",
            type_name::<T>(),
            mismatch
        ))
    })
}

fn has_value<T: PatchValue>(instance: &dyn Any) -> Option<bool> {
    instance
        .downcast_ref::<OptionalValue<T>>()
        .map(OptionalValue::has_value)
}

fn get<T: PatchValue>(instance: &dyn Any) -> Option<OptionalValue<DynamicValue>> {
    instance
        .downcast_ref::<OptionalValue<T>>()
        .map(|container| container.clone().map(PatchValue::into_dynamic))
}

fn set<T: PatchValue>(instance: &mut dyn Any, value: DynamicValue) -> Option<Result<()>> {
    let container = instance.downcast_mut::<OptionalValue<T>>()?;
    Some(convert::<T>(value).map(|payload| container.set(payload)))
}

fn construct<T: PatchValue>(value: Option<DynamicValue>) -> Result<Box<dyn Reflect>> {
    let container = match value {
        Some(value) => OptionalValue::of(convert::<T>(value)?),
        None => OptionalValue::<T>::empty(),
    };
    Ok(Box::new(container))
}
