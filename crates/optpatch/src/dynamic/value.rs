// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic payload values.

use crate::types::TypeHandle;
use std::collections::BTreeMap;

/// An erased payload carried in and out of optional containers.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Composites
    Sequence(Vec<DynamicValue>),
    Map(BTreeMap<String, DynamicValue>),

    // Special
    Null,
}

impl DynamicValue {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::U128(_) => "u128",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::I128(_) => "i128",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Null => "null",
        }
    }

    /// Handle of the Rust type this value converts to without loss.
    ///
    /// Used to infer the inner type when a container is built from a value
    /// alone. Composites infer to `DynamicValue` itself; `Null` infers nothing.
    /// `usize` and `isize` travel as `U64` and `I64`, so those infer to the
    /// fixed-width types.
    pub fn natural_type(&self) -> Option<TypeHandle> {
        let handle = match self {
            Self::Bool(_) => TypeHandle::value::<bool>(),
            Self::U8(_) => TypeHandle::value::<u8>(),
            Self::U16(_) => TypeHandle::value::<u16>(),
            Self::U32(_) => TypeHandle::value::<u32>(),
            Self::U64(_) => TypeHandle::value::<u64>(),
            Self::U128(_) => TypeHandle::value::<u128>(),
            Self::I8(_) => TypeHandle::value::<i8>(),
            Self::I16(_) => TypeHandle::value::<i16>(),
            Self::I32(_) => TypeHandle::value::<i32>(),
            Self::I64(_) => TypeHandle::value::<i64>(),
            Self::I128(_) => TypeHandle::value::<i128>(),
            Self::F32(_) => TypeHandle::value::<f32>(),
            Self::F64(_) => TypeHandle::value::<f64>(),
            Self::Char(_) => TypeHandle::value::<char>(),
            Self::String(_) => TypeHandle::value::<String>(),
            Self::Sequence(_) | Self::Map(_) => TypeHandle::value::<DynamicValue>(),
            Self::Null => return None,
        };
        Some(handle)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u64, widening any unsigned variant.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U8(v) => Some(u64::from(*v)),
            Self::U16(v) => Some(u64::from(*v)),
            Self::U32(v) => Some(u64::from(*v)),
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64, widening any signed variant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(*v)),
            Self::I16(v) => Some(i64::from(*v)),
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, DynamicValue>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get a map entry.
    pub fn get_field(&self, name: &str) -> Option<&DynamicValue> {
        self.as_map().and_then(|fields| fields.get(name))
    }
}

// Conversion traits
impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u8> for DynamicValue {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

impl From<u16> for DynamicValue {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<u32> for DynamicValue {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<u64> for DynamicValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<i8> for DynamicValue {
    fn from(v: i8) -> Self {
        Self::I8(v)
    }
}

impl From<i16> for DynamicValue {
    fn from(v: i16) -> Self {
        Self::I16(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u128> for DynamicValue {
    fn from(v: u128) -> Self {
        Self::U128(v)
    }
}

impl From<i128> for DynamicValue {
    fn from(v: i128) -> Self {
        Self::I128(v)
    }
}

// usize and isize are at most 64 bits on every supported target.
impl From<usize> for DynamicValue {
    fn from(v: usize) -> Self {
        Self::U64(v as u64)
    }
}

impl From<isize> for DynamicValue {
    fn from(v: isize) -> Self {
        Self::I64(v as i64)
    }
}

impl From<f32> for DynamicValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<char> for DynamicValue {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
