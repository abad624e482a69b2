// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversions between payload types and [`DynamicValue`].

use super::DynamicValue;
use crate::types::{TypeHandle, Typed};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamic value could not be converted to the requested payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMismatch {
    pub expected: &'static str,
    pub got: &'static str,
}

impl ValueMismatch {
    fn new(expected: &'static str, got: &DynamicValue) -> Self {
        Self {
            expected,
            got: got.kind_name(),
        }
    }
}

impl fmt::Display for ValueMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type mismatch: expected {}, got {}", self.expected, self.got)
    }
}

impl std::error::Error for ValueMismatch {}

/// A type that can be the payload of an [`OptionalValue`](crate::OptionalValue).
///
/// `from_dynamic` defines assignability: a dynamic value is assignable to `Self`
/// iff it converts. `NULLABLE` types accept [`DynamicValue::Null`].
pub trait PatchValue: Typed + Clone + Send + Sync + 'static {
    /// Whether `DynamicValue::Null` is a legal payload.
    const NULLABLE: bool = false;

    fn into_dynamic(self) -> DynamicValue;

    fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch>;
}

macro_rules! impl_patch_value {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl Typed for $ty {
            fn type_handle() -> TypeHandle {
                TypeHandle::value::<$ty>()
            }
        }

        impl PatchValue for $ty {
            fn into_dynamic(self) -> DynamicValue {
                DynamicValue::$variant(self)
            }

            fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch> {
                match value {
                    DynamicValue::$variant(v) => Ok(v),
                    other => Err(ValueMismatch::new($name, &other)),
                }
            }
        }
    };
}

impl_patch_value!(bool, Bool, "bool");
impl_patch_value!(u8, U8, "u8");
impl_patch_value!(u16, U16, "u16");
impl_patch_value!(u32, U32, "u32");
impl_patch_value!(u64, U64, "u64");
impl_patch_value!(i8, I8, "i8");
impl_patch_value!(i16, I16, "i16");
impl_patch_value!(i32, I32, "i32");
impl_patch_value!(i64, I64, "i64");
impl_patch_value!(u128, U128, "u128");
impl_patch_value!(i128, I128, "i128");
impl_patch_value!(f32, F32, "f32");
impl_patch_value!(f64, F64, "f64");
impl_patch_value!(char, Char, "char");
impl_patch_value!(String, String, "string");

/// Platform-width integers carried by a fixed-width variant.
macro_rules! impl_patch_value_via {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl Typed for $ty {
            fn type_handle() -> TypeHandle {
                TypeHandle::value::<$ty>()
            }
        }

        impl PatchValue for $ty {
            fn into_dynamic(self) -> DynamicValue {
                DynamicValue::from(self)
            }

            fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch> {
                match value {
                    DynamicValue::$variant(v) => <$ty>::try_from(v).map_err(|_| ValueMismatch {
                        expected: $name,
                        got: "out-of-range integer",
                    }),
                    other => Err(ValueMismatch::new($name, &other)),
                }
            }
        }
    };
}

impl_patch_value_via!(usize, U64, "usize");
impl_patch_value_via!(isize, I64, "isize");

impl Typed for DynamicValue {
    fn type_handle() -> TypeHandle {
        TypeHandle::value::<DynamicValue>()
    }
}

impl PatchValue for DynamicValue {
    const NULLABLE: bool = true;

    fn into_dynamic(self) -> DynamicValue {
        self
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch> {
        Ok(value)
    }
}

impl<T: PatchValue> Typed for Option<T> {
    fn type_handle() -> TypeHandle {
        TypeHandle::value::<Option<T>>()
    }
}

impl<T: PatchValue> PatchValue for Option<T> {
    const NULLABLE: bool = true;

    fn into_dynamic(self) -> DynamicValue {
        self.map_or(DynamicValue::Null, PatchValue::into_dynamic)
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch> {
        match value {
            DynamicValue::Null => Ok(None),
            other => T::from_dynamic(other).map(Some),
        }
    }
}

impl<T: PatchValue> Typed for Vec<T> {
    fn type_handle() -> TypeHandle {
        TypeHandle::value::<Vec<T>>()
    }
}

impl<T: PatchValue> PatchValue for Vec<T> {
    fn into_dynamic(self) -> DynamicValue {
        DynamicValue::Sequence(self.into_iter().map(PatchValue::into_dynamic).collect())
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch> {
        match value {
            DynamicValue::Sequence(items) => items.into_iter().map(T::from_dynamic).collect(),
            other => Err(ValueMismatch::new("sequence", &other)),
        }
    }
}

impl<T: PatchValue> Typed for BTreeMap<String, T> {
    fn type_handle() -> TypeHandle {
        TypeHandle::value::<BTreeMap<String, T>>()
    }
}

impl<T: PatchValue> PatchValue for BTreeMap<String, T> {
    fn into_dynamic(self) -> DynamicValue {
        DynamicValue::Map(
            self.into_iter()
                .map(|(k, v)| (k, v.into_dynamic()))
                .collect(),
        )
    }

    fn from_dynamic(value: DynamicValue) -> Result<Self, ValueMismatch> {
        match value {
            DynamicValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_dynamic(v).map(|v| (k, v)))
                .collect(),
            other => Err(ValueMismatch::new("map", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_variant_required() {
        assert_eq!(i32::from_dynamic(DynamicValue::I32(5)), Ok(5));
        let err = i32::from_dynamic(DynamicValue::I64(5)).unwrap_err();
        assert_eq!(err.expected, "i32");
        assert_eq!(err.got, "i64");
        assert!(String::from_dynamic(DynamicValue::Null).is_err());
    }

    #[test]
    fn test_sequence_elements_convert() {
        let seq = DynamicValue::from(vec![1i32, 2, 3]);
        assert_eq!(Vec::<i32>::from_dynamic(seq), Ok(vec![1, 2, 3]));

        let mixed = DynamicValue::Sequence(vec![DynamicValue::I32(1), DynamicValue::Bool(true)]);
        assert_eq!(
            Vec::<i32>::from_dynamic(mixed).unwrap_err().got,
            "bool"
        );
    }

    #[test]
    fn test_platform_integers_use_fixed_width_variants() {
        assert_eq!(5usize.into_dynamic(), DynamicValue::U64(5));
        assert_eq!(usize::from_dynamic(DynamicValue::U64(5)), Ok(5));
        assert_eq!(isize::from_dynamic(DynamicValue::I64(-5)), Ok(-5));
        assert_eq!(usize::from_dynamic(DynamicValue::U32(5)).unwrap_err().got, "u32");
        assert_eq!(
            u128::from_dynamic(DynamicValue::U128(u128::MAX)),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn test_option_is_nullable() {
        assert!(<Option<i32> as PatchValue>::NULLABLE);
        assert!(!<i32 as PatchValue>::NULLABLE);
        assert_eq!(Option::<i32>::from_dynamic(DynamicValue::Null), Ok(None));
        assert_eq!(Some(4i32).into_dynamic(), DynamicValue::I32(4));
        assert!(None::<i32>.into_dynamic().is_null());
    }

    #[test]
    fn test_map_round_trip() {
        let mut scores = BTreeMap::new();
        scores.insert("alice".to_string(), 3u32);
        let dynamic = scores.clone().into_dynamic();
        assert_eq!(dynamic.get_field("alice"), Some(&DynamicValue::U32(3)));
        assert_eq!(BTreeMap::<String, u32>::from_dynamic(dynamic), Ok(scores));
    }
}
