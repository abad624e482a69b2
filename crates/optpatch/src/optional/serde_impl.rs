// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serde support: an `OptionalValue<T>` reads and writes exactly like `Option<T>`.
//!
//! Update-info members should carry `#[serde(default)]` so that a member
//! missing from the request body deserializes to absent. An explicit `null`
//! also reads as absent.

use super::OptionalValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<T: Serialize> Serialize for OptionalValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionalValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(OptionalValue::from)
    }
}
