// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON bridge for dynamic payloads (feature `serde`).

use super::DynamicValue;
use serde_json::{Map, Number, Value};

impl From<DynamicValue> for Value {
    fn from(value: DynamicValue) -> Self {
        match value {
            DynamicValue::Null => Value::Null,
            DynamicValue::Bool(v) => Value::Bool(v),
            DynamicValue::U8(v) => Value::from(v),
            DynamicValue::U16(v) => Value::from(v),
            DynamicValue::U32(v) => Value::from(v),
            DynamicValue::U64(v) => Value::from(v),
            DynamicValue::I8(v) => Value::from(v),
            DynamicValue::I16(v) => Value::from(v),
            DynamicValue::I32(v) => Value::from(v),
            DynamicValue::I64(v) => Value::from(v),
            // Beyond the 64-bit range a JSON number would lose precision.
            DynamicValue::U128(v) => {
                u64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from)
            }
            DynamicValue::I128(v) => {
                i64::try_from(v).map_or_else(|_| Value::String(v.to_string()), Value::from)
            }
            // JSON has no NaN or infinity
            DynamicValue::F32(v) => Number::from_f64(f64::from(v)).map_or(Value::Null, Value::Number),
            DynamicValue::F64(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
            DynamicValue::Char(v) => Value::String(v.to_string()),
            DynamicValue::String(v) => Value::String(v),
            DynamicValue::Sequence(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            DynamicValue::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Value> for DynamicValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DynamicValue::Null,
            Value::Bool(v) => DynamicValue::Bool(v),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    DynamicValue::I64(v)
                } else if let Some(v) = n.as_u64() {
                    DynamicValue::U64(v)
                } else {
                    n.as_f64().map_or(DynamicValue::Null, DynamicValue::F64)
                }
            }
            Value::String(v) => DynamicValue::String(v),
            Value::Array(items) => {
                DynamicValue::Sequence(items.into_iter().map(DynamicValue::from).collect())
            }
            Value::Object(entries) => DynamicValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, DynamicValue::from(v)))
                    .collect(),
            ),
        }
    }
}
