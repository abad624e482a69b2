// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by containers, introspection and patch building.
//!
//! Every variant describes a contract violation by the caller. None of them
//! are transient, so nothing in this crate retries on error.

use std::fmt;

/// Result type for optpatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// optpatch error kinds.
///
/// # Example
///
/// ```rust
/// use optpatch::{Error, OptionalValue};
///
/// let empty = OptionalValue::<i32>::empty();
/// match empty.get() {
///     Err(Error::EmptyValueAccess) => {}
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// A required type handle or value was absent. Carries the parameter name.
    NullArgument(&'static str),
    /// The supplied type or value is not a closed container where one is required.
    InvalidArgument(String),

    // ========================================================================
    // Payload Errors
    // ========================================================================
    /// The payload is null or of a type the container's inner type cannot hold.
    InvalidState(String),
    /// The payload of an absent container was read.
    EmptyValueAccess,

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// An update-info member violates the structural contract.
    SchemaError {
        /// Update-info type (or nested path) owning the member.
        owner: String,
        /// Offending member name.
        member: String,
        /// What is wrong with it.
        reason: String,
    },

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// Failure reported by a storage sink while applying a patch.
    Storage(String),
}

impl Error {
    pub(crate) fn schema(
        owner: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::SchemaError {
            owner: owner.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending member for schema errors.
    pub fn member(&self) -> Option<&str> {
        match self {
            Error::SchemaError { member, .. } => Some(member),
            _ => None,
        }
    }

    /// True for [`Error::SchemaError`].
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::SchemaError { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NullArgument(param) => write!(f, "Argument `{}` must not be null", param),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::EmptyValueAccess => write!(f, "Attempted to read the value of an empty OptionalValue"),
            Error::SchemaError {
                owner,
                member,
                reason,
            } => write!(f, "Schema error in {}.{}: {}", owner, member, reason),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
