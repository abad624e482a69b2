// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reduces update-info instances to patches.

use super::field::{FieldPath, Patch, PatchField};
use super::schema::{MemberKind, MemberVisitor, UpdateInfo, UpdateSchema};
use crate::config::{PatchConfig, DEFAULT_PATH_SEPARATOR};
use crate::dynamic::DynamicValue;
use crate::error::{Error, Result};
use crate::types::{Reflect, TypeIntrospection};
use dashmap::DashSet;
use std::any::{type_name, TypeId};
use std::collections::HashSet;

/// Builds [`Patch`]es from update-info structures.
///
/// Schemas are validated once per update-info type, either up front with
/// [`register`](Self::register) or on the first [`build`](Self::build).
/// Share one builder across threads behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use optpatch::{DynamicValue, OptionalValue, PatchBuilder, TypeIntrospection, UpdateInfo};
///
/// #[derive(UpdateInfo)]
/// struct UserUpdate {
///     name: OptionalValue<String>,
///     age: OptionalValue<i32>,
/// }
///
/// let builder = PatchBuilder::new(TypeIntrospection::default());
/// let update = UserUpdate {
///     name: OptionalValue::empty(),
///     age: OptionalValue::of(30),
/// };
///
/// let patch = builder.build(&update).unwrap();
/// assert_eq!(patch.len(), 1);
/// assert_eq!(patch.get("age"), Some(&DynamicValue::I32(30)));
/// ```
pub struct PatchBuilder {
    introspection: TypeIntrospection,
    config: PatchConfig,
    validated: DashSet<TypeId>,
}

impl PatchBuilder {
    pub fn new(introspection: TypeIntrospection) -> Self {
        Self::with_config(introspection, PatchConfig::default())
    }

    pub fn with_config(introspection: TypeIntrospection, config: PatchConfig) -> Self {
        Self {
            introspection,
            config,
            validated: DashSet::new(),
        }
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    pub fn introspection(&self) -> &TypeIntrospection {
        &self.introspection
    }

    /// Validate the schema of `T` and remember it.
    ///
    /// # Errors
    ///
    /// [`Error::SchemaError`] naming the first offending member.
    pub fn register<T: UpdateInfo>(&self) -> Result<()> {
        let id = TypeId::of::<T>();
        if self.validated.contains(&id) {
            return Ok(());
        }
        self.validate_schema(&T::schema())?;
        self.validated.insert(id);
        log::debug!("[PatchBuilder] registered {}", type_name::<T>());
        Ok(())
    }

    pub fn is_registered<T: UpdateInfo>(&self) -> bool {
        self.validated.contains(&TypeId::of::<T>())
    }

    /// Check a schema without remembering it.
    ///
    /// Every value member must be a closed container type. Member names must
    /// be non-empty, unique per level, and free of both `.` and the configured
    /// path separator. Nested schemas must not form a cycle or exceed
    /// `max_depth`.
    pub fn validate_schema(&self, schema: &UpdateSchema) -> Result<()> {
        let mut stack = Vec::new();
        self.check(schema, &mut stack).map_err(|err| {
            log::warn!("[PatchBuilder] rejected schema {}: {}", schema.owner, err);
            err
        })
    }

    /// The patch for `info`: one field per present member, in declaration
    /// order, nested members under their parent's path.
    pub fn build<T: UpdateInfo>(&self, info: &T) -> Result<Patch> {
        if !self.is_registered::<T>() {
            if !self.config.validate_on_build {
                return Err(Error::InvalidArgument(format!(
                    "update-info type {} is not registered",
                    type_name::<T>()
                )));
            }
            self.register::<T>()?;
        }

        let mut walker = Walker {
            introspection: &self.introspection,
            prefix: FieldPath::root(),
            fields: Vec::new(),
        };
        info.visit_members(&mut walker)?;

        log::debug!(
            "[PatchBuilder] {} -> {} field(s)",
            type_name::<T>(),
            walker.fields.len()
        );
        Ok(Patch::from(walker.fields))
    }

    /// Render a patch as `(path, payload)` assignments using the configured
    /// separator.
    pub fn assignments<'p>(&self, patch: &'p Patch) -> Vec<(String, &'p DynamicValue)> {
        patch
            .iter()
            .map(|field| (field.path.join(&self.config.path_separator), &field.value))
            .collect()
    }

    fn check(&self, schema: &UpdateSchema, stack: &mut Vec<TypeId>) -> Result<()> {
        let owner = schema.owner;
        stack.push(owner.id());

        let mut seen = HashSet::with_capacity(schema.members.len());
        for member in &schema.members {
            if member.name.is_empty() {
                return Err(Error::schema(owner.name(), member.name, "empty member name"));
            }
            // A separator inside a name would render like a nested path.
            if let Some(separator) = self.reserved_separator(member.name) {
                return Err(Error::schema(
                    owner.name(),
                    member.name,
                    format!("member name contains path separator {:?}", separator),
                ));
            }
            if !seen.insert(member.name) {
                return Err(Error::schema(owner.name(), member.name, "duplicate member name"));
            }

            match member.kind {
                MemberKind::Value(declared) => {
                    if !self.introspection.is_container_type(declared)? {
                        return Err(Error::schema(
                            owner.name(),
                            member.name,
                            format!("declared type {} is not an OptionalValue", declared),
                        ));
                    }
                }
                MemberKind::Nested(nested) => {
                    let nested = nested();
                    if stack.contains(&nested.owner.id()) {
                        return Err(Error::schema(
                            owner.name(),
                            member.name,
                            format!("nested type {} forms a cycle", nested.owner),
                        ));
                    }
                    if stack.len() >= self.config.max_depth {
                        return Err(Error::schema(
                            owner.name(),
                            member.name,
                            format!("nesting exceeds max depth {}", self.config.max_depth),
                        ));
                    }
                    self.check(&nested, stack)?;
                }
            }
        }

        stack.pop();
        Ok(())
    }

    fn reserved_separator(&self, name: &str) -> Option<&str> {
        [DEFAULT_PATH_SEPARATOR, self.config.path_separator.as_str()]
            .into_iter()
            .find(|sep| !sep.is_empty() && name.contains(sep))
    }
}

impl std::fmt::Debug for PatchBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatchBuilder")
            .field("config", &self.config)
            .field("registered", &self.validated.len())
            .finish_non_exhaustive()
    }
}

struct Walker<'a> {
    introspection: &'a TypeIntrospection,
    prefix: FieldPath,
    fields: Vec<PatchField>,
}

impl MemberVisitor for Walker<'_> {
    fn visit_value(&mut self, name: &'static str, value: &dyn Reflect) -> Result<()> {
        if !self.introspection.is_container(value) {
            let owner = if self.prefix.is_root() {
                "<root>".to_string()
            } else {
                self.prefix.to_string()
            };
            return Err(Error::schema(
                owner,
                name,
                format!("runtime type {} is not an OptionalValue", value.reflect_handle()),
            ));
        }
        if let Some(payload) = self.introspection.unbox(value)?.into_option() {
            self.fields.push(PatchField::new(self.prefix.child(name), payload));
        }
        Ok(())
    }

    fn visit_nested(&mut self, name: &'static str, nested: &dyn UpdateInfo) -> Result<()> {
        let child = self.prefix.child(name);
        let parent = std::mem::replace(&mut self.prefix, child);
        let result = nested.visit_members(self);
        self.prefix = parent;
        result
    }
}
