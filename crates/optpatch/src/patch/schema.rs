// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Update-info contract: member manifest and member visitor.
//!
//! `#[derive(UpdateInfo)]` implements [`UpdateInfo`] for a struct with named
//! fields. Hand-written impls must list members in declaration order in both
//! `schema` and `visit_members`.

use crate::error::Result;
use crate::types::{Reflect, TypeHandle};

/// How a member participates in a patch.
#[derive(Debug, Clone, Copy)]
pub enum MemberKind {
    /// A value member; its declared type must be a closed `OptionalValue<T>`.
    Value(TypeHandle),
    /// A nested update-info structure, walked recursively.
    Nested(fn() -> UpdateSchema),
}

/// One entry of an [`UpdateSchema`].
#[derive(Debug, Clone, Copy)]
pub struct MemberSchema {
    pub name: &'static str,
    pub kind: MemberKind,
}

impl MemberSchema {
    pub const fn value(name: &'static str, declared: TypeHandle) -> Self {
        Self {
            name,
            kind: MemberKind::Value(declared),
        }
    }

    pub const fn nested(name: &'static str, schema: fn() -> UpdateSchema) -> Self {
        Self {
            name,
            kind: MemberKind::Nested(schema),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.kind, MemberKind::Nested(_))
    }
}

/// Ordered member manifest of an update-info type.
#[derive(Debug, Clone)]
pub struct UpdateSchema {
    pub owner: TypeHandle,
    pub members: Vec<MemberSchema>,
}

impl UpdateSchema {
    pub fn new(owner: TypeHandle, members: Vec<MemberSchema>) -> Self {
        Self { owner, members }
    }

    pub fn member(&self, name: &str) -> Option<&MemberSchema> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Receives the members of an update-info instance, in declaration order.
pub trait MemberVisitor {
    fn visit_value(&mut self, name: &'static str, value: &dyn Reflect) -> Result<()>;

    fn visit_nested(&mut self, name: &'static str, nested: &dyn UpdateInfo) -> Result<()>;
}

/// An update-info structure: a set of optional members describing a partial
/// update of some entity.
///
/// A nested update-info member needs `#[patch(nested)]`; without it the
/// derive treats the member as a value and the struct does not compile:
///
/// ```compile_fail
/// use optpatch::{OptionalValue, UpdateInfo};
///
/// #[derive(UpdateInfo)]
/// struct AddressUpdate {
///     city: OptionalValue<String>,
/// }
///
/// #[derive(UpdateInfo)]
/// struct UserUpdate {
///     name: OptionalValue<String>,
///     address: AddressUpdate,
/// }
/// ```
pub trait UpdateInfo: Send + Sync + 'static {
    /// Member manifest, used for one-time validation.
    fn schema() -> UpdateSchema
    where
        Self: Sized;

    /// Hand every member to `visitor`.
    fn visit_members(&self, visitor: &mut dyn MemberVisitor) -> Result<()>;
}

impl<T: UpdateInfo> UpdateInfo for Box<T> {
    fn schema() -> UpdateSchema {
        T::schema()
    }

    fn visit_members(&self, visitor: &mut dyn MemberVisitor) -> Result<()> {
        (**self).visit_members(visitor)
    }
}

/// A nested member that may be left out entirely; `None` contributes nothing.
impl<T: UpdateInfo> UpdateInfo for Option<T> {
    fn schema() -> UpdateSchema {
        T::schema()
    }

    fn visit_members(&self, visitor: &mut dyn MemberVisitor) -> Result<()> {
        match self {
            Some(inner) => inner.visit_members(visitor),
            None => Ok(()),
        }
    }
}
