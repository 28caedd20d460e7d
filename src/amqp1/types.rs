//! Generic AMQP 1.0 values.

use std::borrow::Borrow;
use std::fmt;

use bytes::Bytes;

/// An ASCII symbolic constant, e.g. `amqp:open:list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Symbol text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifies a described type on the wire.
///
/// Every standard type has both forms; they name the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// Symbolic form, e.g. `amqp:sasl-mechanisms:list`.
    Symbol(Symbol),
    /// Numeric form: `domain_id << 32 | descriptor_id`.
    Code(u64),
}

impl Descriptor {
    /// Symbolic descriptor.
    pub fn symbol(name: &str) -> Self {
        Descriptor::Symbol(Symbol::new(name))
    }

    /// Descriptor as a generic value, for encoding.
    pub fn to_value(&self) -> Value {
        match self {
            Descriptor::Symbol(s) => Value::Symbol(s.clone()),
            Descriptor::Code(c) => Value::Ulong(*c),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Symbol(s) => write!(f, "{}", s),
            Descriptor::Code(c) => write!(f, "0x{:08x}:0x{:08x}", c >> 32, c & 0xffff_ffff),
        }
    }
}

/// A decoded 1.0 value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,
    /// `boolean`
    Bool(bool),
    /// `ubyte`
    Ubyte(u8),
    /// `ushort`
    Ushort(u16),
    /// `uint`
    Uint(u32),
    /// `ulong`
    Ulong(u64),
    /// `byte`
    Byte(i8),
    /// `short`
    Short(i16),
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `float`
    Float(f32),
    /// `double`
    Double(f64),
    /// `decimal32`, raw IEEE 754 bytes.
    Decimal32([u8; 4]),
    /// `decimal64`, raw IEEE 754 bytes.
    Decimal64([u8; 8]),
    /// `decimal128`, raw IEEE 754 bytes.
    Decimal128([u8; 16]),
    /// `char` (UTF-32 code point)
    Char(char),
    /// `timestamp`, milliseconds since the Unix epoch.
    Timestamp(i64),
    /// `uuid`
    Uuid([u8; 16]),
    /// `binary`
    Binary(Bytes),
    /// `string`
    String(String),
    /// `symbol`
    Symbol(Symbol),
    /// `list`
    List(Vec<Value>),
    /// `map`, in wire order.
    Map(Vec<(Value, Value)>),
    /// `array`; every element shares one constructor.
    Array(Vec<Value>),
    /// A described value.
    Described(Box<Described>),
}

/// A descriptor and the value it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct Described {
    /// Type descriptor.
    pub descriptor: Descriptor,
    /// Underlying value, normally a list.
    pub value: Value,
}

impl Value {
    /// Wrap a value with a descriptor.
    pub fn described(descriptor: Descriptor, value: Value) -> Self {
        Value::Described(Box::new(Described { descriptor, value }))
    }

    /// Check for `null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value's 1.0 type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Ubyte(_) => "ubyte",
            Value::Ushort(_) => "ushort",
            Value::Uint(_) => "uint",
            Value::Ulong(_) => "ulong",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Decimal32(_) => "decimal32",
            Value::Decimal64(_) => "decimal64",
            Value::Decimal128(_) => "decimal128",
            Value::Char(_) => "char",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
            Value::Binary(_) => "binary",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
            Value::Described(_) => "described",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_display() {
        assert_eq!(
            Descriptor::symbol("amqp:open:list").to_string(),
            "amqp:open:list"
        );
        assert_eq!(
            Descriptor::Code(0x10).to_string(),
            "0x00000000:0x00000010"
        );
    }

    #[test]
    fn test_descriptor_to_value() {
        assert_eq!(Descriptor::Code(0x40).to_value(), Value::Ulong(0x40));
        assert_eq!(
            Descriptor::symbol("x").to_value(),
            Value::Symbol(Symbol::new("x"))
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::List(vec![]).type_name(), "list");
        assert_eq!(
            Value::described(Descriptor::Code(1), Value::Null).type_name(),
            "described"
        );
    }
}
