// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory JSON document store.

use super::PatchSink;
use crate::error::{Error, Result};
use crate::patch::{FieldPath, Patch};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Keyed JSON documents, updated in place by patches.
///
/// Each patch field is an assignment at its path. Missing intermediate
/// objects are created. A null payload stores JSON `null`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document.
    pub fn insert(&self, key: impl Into<String>, document: Value) {
        self.documents.write().insert(key.into(), document);
    }

    /// Snapshot of a document.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.documents.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl PatchSink for MemoryStore {
    fn apply_patch(&self, key: &str, patch: &Patch) -> Result<bool> {
        let mut documents = self.documents.write();
        let Some(document) = documents.get_mut(key) else {
            return Ok(false);
        };

        // Apply to a copy so a failing field leaves the document untouched.
        let mut updated = document.clone();
        for field in patch {
            assign(&mut updated, &field.path, Value::from(field.value.clone()))?;
        }
        *document = updated;

        log::debug!("[MemoryStore] applied {} field(s) to {}", patch.len(), key);
        Ok(true)
    }
}

fn assign(document: &mut Value, path: &FieldPath, value: Value) -> Result<()> {
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Err(Error::Storage("cannot assign to the document root".into()));
    };

    let mut cursor = document;
    for segment in parents {
        let object = as_object(cursor, path)?;
        cursor = object
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if cursor.is_null() {
            *cursor = Value::Object(Map::new());
        }
    }

    as_object(cursor, path)?.insert(leaf.clone(), value);
    Ok(())
}

fn as_object<'v>(value: &'v mut Value, path: &FieldPath) -> Result<&'v mut Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Storage(format!(
            "cannot assign {}: parent is {}",
            path,
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
