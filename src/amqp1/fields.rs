//! Positional field access for described lists.

use bytes::Bytes;

use super::described::DescribedType;
use super::types::{Symbol, Value};
use crate::error::{Result, WireError};

/// Conversion from a generic value to a field type.
pub trait FromValue: Sized {
    /// 1.0 type name reported on mismatch.
    const EXPECTED: &'static str;

    /// Convert, or `None` if the value has another type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $name;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_value! {
    bool => Bool, "boolean";
    u8 => Ubyte, "ubyte";
    u16 => Ushort, "ushort";
    u32 => Uint, "uint";
    u64 => Ulong, "ulong";
    i32 => Int, "int";
    i64 => Long, "long";
    String => String, "string";
    Symbol => Symbol, "symbol";
    Bytes => Binary, "binary";
}

/// Map fields (`properties`, `info`) keep their entries generic.
impl FromValue for Vec<(Value, Value)> {
    const EXPECTED: &'static str = "map";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(entries) => Some(entries.clone()),
            _ => None,
        }
    }
}

/// Conversion from a field type back to a generic value.
pub trait IntoValue {
    /// Convert.
    fn into_value(self) -> Value;
}

macro_rules! into_value {
    ($($ty:ty => $variant:ident;)*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

into_value! {
    bool => Bool;
    u8 => Ubyte;
    u16 => Ushort;
    u32 => Uint;
    u64 => Ulong;
    i32 => Int;
    i64 => Long;
    String => String;
    Symbol => Symbol;
    Bytes => Binary;
    Vec<(Value, Value)> => Map;
}

/// Encode an optional field, `null` when unset.
pub fn field<T: IntoValue + Clone>(value: &Option<T>) -> Value {
    value.clone().map_or(Value::Null, IntoValue::into_value)
}

/// Encode an optional repeated field as an array, `null` when unset.
pub fn multiple_field<T: IntoValue + Clone>(values: &Option<Vec<T>>) -> Value {
    match values {
        Some(values) => Value::Array(values.iter().cloned().map(IntoValue::into_value).collect()),
        None => Value::Null,
    }
}

/// Cursor over the items of a described list, in schema order.
///
/// Items past the end of a short list and `null` items both read as unset.
#[derive(Debug)]
pub struct ListFields<'a> {
    type_name: &'static str,
    items: &'a [Value],
    pos: usize,
}

impl<'a> ListFields<'a> {
    /// Walk `items` on behalf of `type_name` (used in error messages).
    pub fn new(type_name: &'static str, items: &'a [Value]) -> Self {
        Self {
            type_name,
            items,
            pos: 0,
        }
    }

    /// Items not yet visited.
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.pos)
    }

    fn next_present(&mut self) -> Option<&'a Value> {
        let item = self.items.get(self.pos);
        self.pos += 1;
        item.filter(|v| !v.is_null())
    }

    fn mismatch(&self, field: &str, expected: &str, found: &Value) -> WireError {
        WireError::UnexpectedEncoding(format!(
            "{}.{}: expected {}, found {}",
            self.type_name,
            field,
            expected,
            found.type_name()
        ))
    }

    /// Next field as a single value.
    ///
    /// # Errors
    ///
    /// `UnexpectedEncoding` if the item is present with another type.
    pub fn scalar<T: FromValue>(&mut self, field: &str) -> Result<Option<T>> {
        match self.next_present() {
            None => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .ok_or_else(|| self.mismatch(field, T::EXPECTED, value)),
        }
    }

    /// Next field as a nested described type.
    pub fn described<D: DescribedType>(&mut self, field: &str) -> Result<Option<D>> {
        match self.next_present() {
            None => Ok(None),
            Some(value @ Value::Described(_)) => D::from_described(value).map(Some),
            Some(value) => Err(self.mismatch(field, D::NAME, value)),
        }
    }

    /// Next field as a repeated value.
    ///
    /// An array or list of `T` is taken as is, and a single `T` becomes a
    /// one-element vec.
    ///
    /// Compatibility shim: any other shape (including a collection with a
    /// non-`T` element) leaves the field unset and reports nothing. This
    /// path never returns an error.
    pub fn multiple<T: FromValue>(&mut self, _field: &str) -> Option<Vec<T>> {
        match self.next_present()? {
            Value::Array(items) | Value::List(items) => {
                items.iter().map(T::from_value).collect::<Option<Vec<T>>>()
            }
            single => T::from_value(single).map(|v| vec![v]),
        }
    }
}
