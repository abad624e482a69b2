// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type handles and the object-safe [`Reflect`] trait.

use super::descriptor::ContainerDescriptor;
use crate::dynamic::PatchValue;
use crate::optional::OptionalValue;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Copyable runtime handle for a Rust type.
///
/// Two handles are equal iff they name the same type. Handles of closed
/// `OptionalValue<T>` types carry the thunk that builds their
/// [`ContainerDescriptor`]; handles of payload types know how to reach their
/// container type.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    id: TypeId,
    name: &'static str,
    shape: Shape,
}

#[derive(Clone, Copy)]
enum Shape {
    /// Any non-container type. `wrap` is set when the type can be a payload.
    Plain { wrap: Option<fn() -> TypeHandle> },
    /// A closed `OptionalValue<T>`.
    Container { build: fn() -> ContainerDescriptor },
    /// The unbound `OptionalValue<_>` template.
    Template,
}

/// Marker standing in for the unbound container template.
struct OptionalTemplate;

impl TypeHandle {
    /// Handle of any [`Typed`] type.
    #[must_use]
    pub fn of<T: Typed>() -> Self {
        T::type_handle()
    }

    /// Handle of a payload type; containers of it can be built at runtime.
    #[must_use]
    pub fn value<T: PatchValue>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            shape: Shape::Plain {
                wrap: Some(TypeHandle::container::<T>),
            },
        }
    }

    /// Handle of a type that can never be a payload.
    #[must_use]
    pub fn opaque<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            shape: Shape::Plain { wrap: None },
        }
    }

    /// Handle of the closed container `OptionalValue<T>`.
    #[must_use]
    pub fn container<T: PatchValue>() -> Self {
        Self {
            id: TypeId::of::<OptionalValue<T>>(),
            name: type_name::<OptionalValue<T>>(),
            shape: Shape::Container {
                build: ContainerDescriptor::of::<T>,
            },
        }
    }

    /// Handle of the unbound `OptionalValue<_>` template.
    ///
    /// It is never a closed container and has no inner type.
    #[must_use]
    pub fn optional_template() -> Self {
        Self {
            id: TypeId::of::<OptionalTemplate>(),
            name: "optpatch::OptionalValue<_>",
            shape: Shape::Template,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True for closed `OptionalValue<T>` handles.
    pub fn is_closed_container(&self) -> bool {
        matches!(self.shape, Shape::Container { .. })
    }

    pub fn is_template(&self) -> bool {
        matches!(self.shape, Shape::Template)
    }

    /// True if this type may be the payload of a container.
    pub fn is_payload(&self) -> bool {
        matches!(self.shape, Shape::Plain { wrap: Some(_) })
    }

    /// Handle of `OptionalValue<Self>`, if this type can be a payload.
    pub fn container_handle(&self) -> Option<TypeHandle> {
        match self.shape {
            Shape::Plain { wrap: Some(wrap) } => Some(wrap()),
            _ => None,
        }
    }

    pub(crate) fn descriptor_thunk(&self) -> Option<fn() -> ContainerDescriptor> {
        match self.shape {
            Shape::Container { build } => Some(build),
            _ => None,
        }
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Types with a static runtime handle.
///
/// Implemented for every payload type, for `OptionalValue<T>`, and by
/// `#[derive(UpdateInfo)]` for update-info structs. Other types opt in with
/// [`TypeHandle::opaque`].
pub trait Typed: 'static {
    fn type_handle() -> TypeHandle;
}

/// Object-safe view of a [`Typed`] value, used wherever a value is handed
/// over without its static type.
pub trait Reflect: Any + Send + Sync {
    /// Handle of the value's runtime type.
    fn reflect_handle(&self) -> TypeHandle;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn clone_reflect(&self) -> Box<dyn Reflect>;
}

impl<T: Typed + Clone + Send + Sync> Reflect for T {
    fn reflect_handle(&self) -> TypeHandle {
        T::type_handle()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_reflect(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }
}

impl dyn Reflect {
    /// True if the runtime type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Reflect({})", self.reflect_handle().name())
    }
}

impl Clone for Box<dyn Reflect> {
    fn clone(&self) -> Self {
        (**self).clone_reflect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Account;

    impl Typed for Account {
        fn type_handle() -> TypeHandle {
            TypeHandle::opaque::<Account>()
        }
    }

    #[test]
    fn test_handle_identity() {
        assert_eq!(TypeHandle::of::<i32>(), TypeHandle::value::<i32>());
        assert_ne!(TypeHandle::of::<i32>(), TypeHandle::of::<i64>());
        assert_eq!(
            TypeHandle::of::<OptionalValue<i32>>(),
            TypeHandle::container::<i32>()
        );
        assert_eq!(TypeHandle::of::<i32>().name(), "i32");
    }

    #[test]
    fn test_shapes() {
        let payload = TypeHandle::of::<String>();
        assert!(payload.is_payload());
        assert!(!payload.is_closed_container());
        assert_eq!(
            payload.container_handle(),
            Some(TypeHandle::container::<String>())
        );

        let container = TypeHandle::container::<String>();
        assert!(container.is_closed_container());
        assert!(container.container_handle().is_none());

        let template = TypeHandle::optional_template();
        assert!(template.is_template());
        assert!(!template.is_closed_container());
        assert!(!template.is_payload());

        let opaque = TypeHandle::of::<Account>();
        assert!(!opaque.is_payload());
        assert!(opaque.descriptor_thunk().is_none());
    }

    #[test]
    fn test_reflect_downcast() {
        let mut boxed: Box<dyn Reflect> = Box::new(41i32);
        assert!(boxed.is::<i32>());
        assert!(!boxed.is::<Account>());
        if let Some(v) = boxed.downcast_mut::<i32>() {
            *v += 1;
        }
        assert_eq!(boxed.downcast_ref::<i32>(), Some(&42));

        let copy = boxed.clone();
        assert_eq!(copy.reflect_handle(), TypeHandle::of::<i32>());
        assert_eq!(format!("{:?}", copy), "dyn Reflect(i32)");
    }
}
