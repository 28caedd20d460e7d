//! AMQP 1.0 primitive value decoding.
//!
//! Every value starts with a one-byte format code. Compound values (list,
//! map, array) carry a size and an element count; both are checked against
//! the bytes the value actually occupies.

use bytes::Bytes;

use super::codes::*;
use super::types::{Descriptor, Symbol, Value};
use crate::codec::WireReader;
use crate::error::{Result, WireError};

/// Deepest nesting of compounds and described values accepted.
pub const MAX_NESTING: usize = 32;

/// Decode one value, descriptor included when present.
///
/// On error the reader is rolled back to where the value started.
///
/// # Example
///
/// ```
/// use amqp_wire::amqp1::{decoder, Value};
/// use amqp_wire::codec::WireReader;
///
/// // list8 of [smalluint 7, true]
/// let mut reader = WireReader::from_slice(&[0xc0, 0x04, 0x02, 0x52, 0x07, 0x41]);
/// let value = decoder::read_value(&mut reader).unwrap();
/// assert_eq!(value, Value::List(vec![Value::Uint(7), Value::Bool(true)]));
/// ```
pub fn read_value(reader: &mut WireReader) -> Result<Value> {
    let mark = reader.mark();
    let result = read_value_inner(reader, 0);
    if result.is_err() {
        reader.reset(mark);
    }
    result
}

/// Decode a complete buffer holding exactly one value.
pub fn decode(buf: Bytes) -> Result<Value> {
    let mut reader = WireReader::new(buf);
    let value = read_value(&mut reader)?;
    if !reader.is_exhausted() {
        return Err(WireError::Encoding(format!(
            "{} trailing bytes after value",
            reader.declared_remaining()
        )));
    }
    Ok(value)
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_NESTING {
        return Err(WireError::Encoding(format!(
            "values nested deeper than {} levels",
            MAX_NESTING
        )));
    }
    Ok(())
}

fn read_value_inner(reader: &mut WireReader, depth: usize) -> Result<Value> {
    check_depth(depth)?;
    let code = reader.read_u8()?;
    if code == DESCRIBED {
        let descriptor = read_descriptor(reader, depth)?;
        let value = read_value_inner(reader, depth + 1)?;
        return Ok(Value::described(descriptor, value));
    }
    read_with_code(code, reader, depth)
}

/// Read a descriptor: a symbol or an unsigned long, in any of their forms.
/// A descriptor is never itself described.
fn read_descriptor(reader: &mut WireReader, depth: usize) -> Result<Descriptor> {
    let code = reader.read_u8()?;
    if code == DESCRIBED {
        return Err(WireError::UnexpectedEncoding(
            "descriptor must be a symbol or ulong, found described".to_string(),
        ));
    }
    match read_with_code(code, reader, depth + 1)? {
        Value::Symbol(s) => Ok(Descriptor::Symbol(s)),
        Value::Ulong(code) => Ok(Descriptor::Code(code)),
        other => Err(WireError::UnexpectedEncoding(format!(
            "descriptor must be a symbol or ulong, found {}",
            other.type_name()
        ))),
    }
}

fn read_with_code(code: u8, reader: &mut WireReader, depth: usize) -> Result<Value> {
    let value = match code {
        NULL => Value::Null,
        BOOLEAN_TRUE => Value::Bool(true),
        BOOLEAN_FALSE => Value::Bool(false),
        BOOLEAN => match reader.read_u8()? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            other => {
                return Err(WireError::Encoding(format!(
                    "boolean octet must be 0 or 1, found {}",
                    other
                )))
            }
        },
        UBYTE => Value::Ubyte(reader.read_u8()?),
        USHORT => Value::Ushort(reader.read_u16()?),
        UINT => Value::Uint(reader.read_u32()?),
        SMALL_UINT => Value::Uint(u32::from(reader.read_u8()?)),
        UINT0 => Value::Uint(0),
        ULONG => Value::Ulong(reader.read_u64()?),
        SMALL_ULONG => Value::Ulong(u64::from(reader.read_u8()?)),
        ULONG0 => Value::Ulong(0),
        BYTE => Value::Byte(reader.read_i8()?),
        SHORT => Value::Short(reader.read_i16()?),
        INT => Value::Int(reader.read_i32()?),
        SMALL_INT => Value::Int(i32::from(reader.read_i8()?)),
        LONG => Value::Long(reader.read_i64()?),
        SMALL_LONG => Value::Long(i64::from(reader.read_i8()?)),
        FLOAT => Value::Float(reader.read_f32()?),
        DOUBLE => Value::Double(reader.read_f64()?),
        DECIMAL32 => Value::Decimal32(reader.read_array()?),
        DECIMAL64 => Value::Decimal64(reader.read_array()?),
        DECIMAL128 => Value::Decimal128(reader.read_array()?),
        CHAR => {
            let raw = reader.read_u32()?;
            let c = char::from_u32(raw).ok_or_else(|| {
                WireError::Encoding(format!("0x{:08x} is not a valid char", raw))
            })?;
            Value::Char(c)
        }
        TIMESTAMP => Value::Timestamp(reader.read_i64()?),
        UUID => Value::Uuid(reader.read_array()?),
        VBIN8 => {
            let len = reader.read_u8()? as usize;
            Value::Binary(reader.read_bytes(len)?)
        }
        VBIN32 => {
            let len = reader.read_u32()? as usize;
            Value::Binary(reader.read_bytes(len)?)
        }
        STR8 => {
            let len = reader.read_u8()? as usize;
            Value::String(read_utf8(reader, len, "string")?)
        }
        STR32 => {
            let len = reader.read_u32()? as usize;
            Value::String(read_utf8(reader, len, "string")?)
        }
        SYM8 => {
            let len = reader.read_u8()? as usize;
            Value::Symbol(Symbol::new(read_utf8(reader, len, "symbol")?))
        }
        SYM32 => {
            let len = reader.read_u32()? as usize;
            Value::Symbol(Symbol::new(read_utf8(reader, len, "symbol")?))
        }
        LIST0 => Value::List(Vec::new()),
        LIST8 => Value::List(read_sized(reader, false, depth + 1, read_list_items)?),
        LIST32 => Value::List(read_sized(reader, true, depth + 1, read_list_items)?),
        MAP8 => Value::Map(read_sized(reader, false, depth + 1, read_map_entries)?),
        MAP32 => Value::Map(read_sized(reader, true, depth + 1, read_map_entries)?),
        ARRAY8 => Value::Array(read_sized(reader, false, depth + 1, read_array_items)?),
        ARRAY32 => Value::Array(read_sized(reader, true, depth + 1, read_array_items)?),
        other => {
            return Err(WireError::Encoding(format!(
                "unknown format code 0x{:02x}",
                other
            )))
        }
    };
    Ok(value)
}

fn read_utf8(reader: &mut WireReader, len: usize, what: &str) -> Result<String> {
    let raw = reader.read_bytes(len)?;
    String::from_utf8(raw.to_vec())
        .map_err(|e| WireError::Encoding(format!("{} is not UTF-8: {}", what, e)))
}

/// Read `[size][count]`, then the elements inside exactly `size` bytes.
///
/// Every element occupies at least one byte, so a count above the size is
/// rejected before any element is read.
fn read_sized<T>(
    reader: &mut WireReader,
    wide: bool,
    depth: usize,
    body: impl FnOnce(&mut WireReader, usize, usize) -> Result<T>,
) -> Result<T> {
    check_depth(depth)?;
    let size = if wide {
        reader.read_u32()? as usize
    } else {
        reader.read_u8()? as usize
    };
    if size > reader.declared_remaining() {
        return Err(WireError::Encoding(format!(
            "compound size {} exceeds remaining {} bytes",
            size,
            reader.declared_remaining()
        )));
    }

    let outer = reader.push_limit(size);
    let count = if wide {
        reader.read_u32()? as usize
    } else {
        reader.read_u8()? as usize
    };
    if count > reader.declared_remaining() {
        return Err(WireError::Encoding(format!(
            "element count {} exceeds the {} bytes left in the compound",
            count,
            reader.declared_remaining()
        )));
    }
    let out = body(reader, count, depth)?;

    if !reader.is_exhausted() {
        return Err(WireError::Encoding(format!(
            "compound declared {} bytes but {} were left unread",
            size,
            reader.declared_remaining()
        )));
    }
    reader.restore_limit(outer);
    Ok(out)
}

fn read_list_items(reader: &mut WireReader, count: usize, depth: usize) -> Result<Vec<Value>> {
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(read_value_inner(reader, depth)?);
    }
    Ok(items)
}

fn read_map_entries(
    reader: &mut WireReader,
    count: usize,
    depth: usize,
) -> Result<Vec<(Value, Value)>> {
    if count % 2 != 0 {
        return Err(WireError::Encoding(format!(
            "map has odd element count {}",
            count
        )));
    }
    let mut entries = Vec::with_capacity(count / 2);
    for _ in 0..count / 2 {
        let key = read_value_inner(reader, depth)?;
        let value = read_value_inner(reader, depth)?;
        entries.push((key, value));
    }
    Ok(entries)
}

fn read_array_items(reader: &mut WireReader, count: usize, depth: usize) -> Result<Vec<Value>> {
    let mut code = reader.read_u8()?;
    let descriptor = if code == DESCRIBED {
        let descriptor = read_descriptor(reader, depth)?;
        code = reader.read_u8()?;
        Some(descriptor)
    } else {
        None
    };

    // only an empty array may use a constructor with no element bytes
    if count > 0 && is_zero_width(code) {
        return Err(WireError::Encoding(format!(
            "array of {} elements uses zero-width constructor 0x{:02x}",
            count, code
        )));
    }

    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let value = read_with_code(code, reader, depth)?;
        items.push(match &descriptor {
            Some(d) => Value::described(d.clone(), value),
            None => value,
        });
    }
    Ok(items)
}
