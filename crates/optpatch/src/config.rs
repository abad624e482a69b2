// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Patch builder configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separator placed between path segments when a field path is rendered.
pub const DEFAULT_PATH_SEPARATOR: &str = ".";

/// Maximum nesting depth of update-info structures.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Patch builder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatchConfig {
    /// Separator used by `PatchBuilder::assignments` (default: ".")
    pub path_separator: String,

    /// Deepest allowed nesting of update-info members (root = 1)
    pub max_depth: usize,

    /// Validate an unregistered schema on its first build (default: true).
    /// When false, `build` fails for types that were not registered.
    pub validate_on_build: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            validate_on_build: true,
        }
    }
}

impl PatchConfig {
    /// Create a new config builder
    pub fn builder() -> PatchConfigBuilder {
        PatchConfigBuilder::default()
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct PatchConfigBuilder {
    path_separator: Option<String>,
    max_depth: Option<usize>,
    validate_on_build: Option<bool>,
}

impl PatchConfigBuilder {
    /// Set the path separator
    pub fn path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = Some(separator.into());
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Validate unregistered schemas lazily (default: true)
    pub fn validate_on_build(mut self, validate: bool) -> Self {
        self.validate_on_build = Some(validate);
        self
    }

    /// Build the configuration
    pub fn build(self) -> PatchConfig {
        let defaults = PatchConfig::default();

        PatchConfig {
            path_separator: self.path_separator.unwrap_or(defaults.path_separator),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            validate_on_build: self
                .validate_on_build
                .unwrap_or(defaults.validate_on_build),
        }
    }
}
