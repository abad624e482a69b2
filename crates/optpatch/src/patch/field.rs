// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field paths and the patch sequence handed to the storage layer.

use crate::config::DEFAULT_PATH_SEPARATOR;
use crate::dynamic::DynamicValue;
use std::fmt;

/// Ordered member names from the update-info root down to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path (the update-info root).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, i.e. the member name.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Render with `separator` between segments.
    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }

    /// True if the rendered path equals `dotted` (segments split on `.`).
    ///
    /// Always `.`, whatever `PatchConfig::path_separator` says; member names
    /// containing `.` are rejected at registration, so the split is exact.
    pub fn matches(&self, dotted: &str) -> bool {
        !self.is_root() && self.segments.iter().map(String::as_str).eq(dotted.split('.'))
    }
}

/// Renders with [`DEFAULT_PATH_SEPARATOR`]. The configured separator only
/// applies to `PatchBuilder::assignments`.
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(DEFAULT_PATH_SEPARATOR))
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One assignment: a path and the payload to store there.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchField {
    pub path: FieldPath,
    pub value: DynamicValue,
}

impl PatchField {
    pub fn new(path: FieldPath, value: DynamicValue) -> Self {
        Self { path, value }
    }
}

/// Ordered patch fields produced for one update-info instance.
///
/// Fields appear in member declaration order and each path at most once.
/// An empty patch means nothing was specified; callers decide whether that
/// warrants a storage call at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Vec<PatchField>,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatchField> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &[PatchField] {
        &self.fields
    }

    /// Payload at a dotted path, e.g. `"address.city"`.
    ///
    /// Lookups always use `.`; see `PatchBuilder::assignments` for paths in
    /// the configured separator.
    pub fn get(&self, dotted: &str) -> Option<&DynamicValue> {
        self.fields
            .iter()
            .find(|field| field.path.matches(dotted))
            .map(|field| &field.value)
    }

    pub fn contains(&self, dotted: &str) -> bool {
        self.get(dotted).is_some()
    }

    /// Rendered paths, in order, joined with `.`.
    pub fn paths(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.path.to_string()).collect()
    }
}

impl From<Vec<PatchField>> for Patch {
    fn from(fields: Vec<PatchField>) -> Self {
        Self { fields }
    }
}

impl IntoIterator for Patch {
    type Item = PatchField;
    type IntoIter = std::vec::IntoIter<PatchField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchField;
    type IntoIter = std::slice::Iter<'a, PatchField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path() {
        let path = FieldPath::root().child("address").child("city");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.leaf(), Some("city"));
        assert_eq!(path.to_string(), "address.city");
        assert_eq!(path.join("/"), "address/city");
        assert!(path.matches("address.city"));
        assert!(!path.matches("address"));
        assert!(!FieldPath::root().matches(""));
        assert_eq!(path, FieldPath::from_iter(["address", "city"]));
    }

    #[test]
    fn test_patch_lookup() {
        let patch = Patch::from(vec![
            PatchField::new(FieldPath::root().child("age"), DynamicValue::I32(30)),
            PatchField::new(
                FieldPath::root().child("address").child("city"),
                DynamicValue::from("Oslo"),
            ),
        ]);
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("age"), Some(&DynamicValue::I32(30)));
        assert!(patch.contains("address.city"));
        assert!(!patch.contains("address"));
        assert_eq!(patch.paths(), vec!["age", "address.city"]);
        assert!(Patch::default().is_empty());
    }
}
