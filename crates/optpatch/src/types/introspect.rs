// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-erased operations over optional containers.
//!
//! Type-level queries take a [`TypeHandle`] and need no instance, so a schema
//! can be validated once. Value-level operations take `&dyn Reflect` and
//! serve every instance afterwards. Both resolve descriptors through the
//! injected [`DescriptorCache`].
//!
//! Type-level entry points accept `impl Into<Option<TypeHandle>>`; passing
//! `None` is the absent handle and yields [`Error::NullArgument`].

use super::cache::DescriptorCache;
use super::descriptor::ContainerDescriptor;
use super::handle::{Reflect, TypeHandle};
use crate::dynamic::DynamicValue;
use crate::error::{Error, Result};
use crate::optional::OptionalValue;
use std::any::TypeId;
use std::sync::Arc;

/// Stateless façade over a shared [`DescriptorCache`].
///
/// # Example
///
/// ```rust
/// use optpatch::{DynamicValue, OptionalValue, TypeHandle, TypeIntrospection};
///
/// let introspection = TypeIntrospection::default();
/// let mut boxed = introspection.create_empty(TypeHandle::of::<i32>()).unwrap();
/// introspection
///     .set_inner_value(boxed.as_mut(), DynamicValue::I32(30))
///     .unwrap();
///
/// let unboxed = introspection.unbox(boxed.as_ref()).unwrap();
/// assert_eq!(unboxed, OptionalValue::of(DynamicValue::I32(30)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeIntrospection {
    cache: Arc<DescriptorCache>,
}

impl TypeIntrospection {
    #[must_use]
    pub fn new(cache: Arc<DescriptorCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    // ------------------------------------------------------------------
    // Type-level
    // ------------------------------------------------------------------

    /// True iff `ty` is a closed `OptionalValue<T>` (never the template).
    pub fn is_container_type(&self, ty: impl Into<Option<TypeHandle>>) -> Result<bool> {
        let ty = require(ty)?;
        if !ty.is_closed_container() {
            return Ok(false);
        }
        self.cache.get_or_build(ty)?;
        Ok(true)
    }

    /// True iff `ty` is exactly `OptionalValue<T>`.
    pub fn is_container_type_of<T: 'static>(
        &self,
        ty: impl Into<Option<TypeHandle>>,
    ) -> Result<bool> {
        let ty = require(ty)?;
        if !ty.is_closed_container() {
            return Ok(false);
        }
        Ok(self.cache.get_or_build(ty)?.inner().id() == TypeId::of::<T>())
    }

    /// Handle of `T` for a closed `OptionalValue<T>` handle.
    ///
    /// # Errors
    ///
    /// `NullArgument` for `None`, `InvalidArgument` for anything that is not
    /// a closed container.
    pub fn inner_type(&self, ty: impl Into<Option<TypeHandle>>) -> Result<TypeHandle> {
        Ok(self.descriptor(ty)?.inner())
    }

    /// The cached descriptor of a closed container handle.
    pub fn descriptor(
        &self,
        ty: impl Into<Option<TypeHandle>>,
    ) -> Result<Arc<ContainerDescriptor>> {
        self.cache.get_or_build(require(ty)?)
    }

    // ------------------------------------------------------------------
    // Value-level
    // ------------------------------------------------------------------

    /// True iff the runtime type of `value` is a closed container.
    pub fn is_container(&self, value: &dyn Reflect) -> bool {
        self.resolve(value).is_ok()
    }

    /// True iff the runtime type of `value` is exactly `OptionalValue<T>`.
    pub fn is_container_of<T: 'static>(&self, value: &dyn Reflect) -> bool {
        self.resolve(value)
            .is_ok_and(|desc| desc.inner().id() == TypeId::of::<T>())
    }

    pub fn has_value(&self, value: &dyn Reflect) -> Result<bool> {
        self.resolve(value)?.has_value(value)
    }

    /// Presence and erased payload of a container, whatever its `T`.
    pub fn unbox(&self, value: &dyn Reflect) -> Result<OptionalValue<DynamicValue>> {
        self.resolve(value)?.get(value)
    }

    /// Replace the payload of `container` in place.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `container` is not a closed container.
    /// `InvalidState` if `value` is null and `T` is not nullable, or if
    /// `value` is not assignable to `T`.
    pub fn set_inner_value(&self, container: &mut dyn Reflect, value: DynamicValue) -> Result<()> {
        let desc = self.resolve(&*container)?;
        desc.set(container, value)
    }

    /// Absent container whose inner type is `ty`.
    pub fn create_empty(&self, ty: impl Into<Option<TypeHandle>>) -> Result<Box<dyn Reflect>> {
        self.wrapping(ty)?.construct(None)
    }

    /// Present container whose inner type is `ty`, holding `value`.
    pub fn create(
        &self,
        ty: impl Into<Option<TypeHandle>>,
        value: DynamicValue,
    ) -> Result<Box<dyn Reflect>> {
        self.wrapping(ty)?.construct(Some(value))
    }

    /// Present container with the inner type inferred from `value`.
    ///
    /// # Errors
    ///
    /// `NullArgument` for `DynamicValue::Null`, which has no type to infer.
    pub fn create_inferred(&self, value: DynamicValue) -> Result<Box<dyn Reflect>> {
        let ty = value.natural_type().ok_or(Error::NullArgument("value"))?;
        self.create(ty, value)
    }

    fn resolve(&self, value: &dyn Reflect) -> Result<Arc<ContainerDescriptor>> {
        self.cache.get_or_build(value.reflect_handle())
    }

    fn wrapping(&self, ty: impl Into<Option<TypeHandle>>) -> Result<Arc<ContainerDescriptor>> {
        let ty = require(ty)?;
        let container = ty.container_handle().ok_or_else(|| {
            Error::InvalidArgument(format!("{} cannot be an OptionalValue payload", ty))
        })?;
        self.cache.get_or_build(container)
    }
}

fn require(ty: impl Into<Option<TypeHandle>>) -> Result<TypeHandle> {
    ty.into().ok_or(Error::NullArgument("type"))
}
