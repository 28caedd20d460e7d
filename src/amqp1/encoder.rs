//! AMQP 1.0 primitive value encoding.
//!
//! Scalars use their most compact form (`uint0`, `smalluint`, `list0`, ...).
//! Array elements share one constructor, so they use the fixed-width form
//! of their type.

use bytes::{BufMut, Bytes, BytesMut};

use super::codes::*;
use super::types::Value;
use crate::error::{Result, WireError};

/// Encode a value into a new buffer.
///
/// # Example
///
/// ```
/// use amqp_wire::amqp1::{encoder, Value};
///
/// let bytes = encoder::encode(&Value::Uint(7)).unwrap();
/// assert_eq!(bytes.as_ref(), &[0x52, 0x07]);
/// ```
pub fn encode(value: &Value) -> Result<Bytes> {
    let mut out = BytesMut::new();
    write_value(&mut out, value)?;
    Ok(out.freeze())
}

/// Append a value with its constructor.
///
/// # Errors
///
/// `Encoding` if an array mixes element types or descriptors.
pub fn write_value(out: &mut impl BufMut, value: &Value) -> Result<()> {
    match value {
        Value::Null => out.put_u8(NULL),
        Value::Bool(true) => out.put_u8(BOOLEAN_TRUE),
        Value::Bool(false) => out.put_u8(BOOLEAN_FALSE),
        Value::Ubyte(v) => {
            out.put_u8(UBYTE);
            out.put_u8(*v);
        }
        Value::Ushort(v) => {
            out.put_u8(USHORT);
            out.put_u16(*v);
        }
        Value::Uint(0) => out.put_u8(UINT0),
        Value::Uint(v) if *v <= 0xff => {
            out.put_u8(SMALL_UINT);
            out.put_u8(*v as u8);
        }
        Value::Uint(v) => {
            out.put_u8(UINT);
            out.put_u32(*v);
        }
        Value::Ulong(0) => out.put_u8(ULONG0),
        Value::Ulong(v) if *v <= 0xff => {
            out.put_u8(SMALL_ULONG);
            out.put_u8(*v as u8);
        }
        Value::Ulong(v) => {
            out.put_u8(ULONG);
            out.put_u64(*v);
        }
        Value::Int(v) if i8::try_from(*v).is_ok() => {
            out.put_u8(SMALL_INT);
            out.put_i8(*v as i8);
        }
        Value::Long(v) if i8::try_from(*v).is_ok() => {
            out.put_u8(SMALL_LONG);
            out.put_i8(*v as i8);
        }
        Value::Binary(b) if b.len() <= 0xff => {
            out.put_u8(VBIN8);
            write_element(out, VBIN8, value)?;
        }
        Value::String(s) if s.len() <= 0xff => {
            out.put_u8(STR8);
            write_element(out, STR8, value)?;
        }
        Value::Symbol(s) if s.as_str().len() <= 0xff => {
            out.put_u8(SYM8);
            write_element(out, SYM8, value)?;
        }
        Value::List(items) if items.is_empty() => out.put_u8(LIST0),
        Value::List(items) => {
            let mut body = BytesMut::new();
            for item in items {
                write_value(&mut body, item)?;
            }
            write_compound(out, LIST8, LIST32, items.len(), &body);
        }
        Value::Map(entries) => {
            let mut body = BytesMut::new();
            for (key, value) in entries {
                write_value(&mut body, key)?;
                write_value(&mut body, value)?;
            }
            write_compound(out, MAP8, MAP32, entries.len() * 2, &body);
        }
        Value::Array(items) => {
            let body = array_body(items)?;
            write_compound(out, ARRAY8, ARRAY32, items.len(), &body);
        }
        Value::Described(d) => {
            out.put_u8(DESCRIBED);
            write_value(out, &d.descriptor.to_value())?;
            write_value(out, &d.value)?;
        }
        other => {
            let code = fixed_code(other);
            out.put_u8(code);
            write_element(out, code, other)?;
        }
    }
    Ok(())
}

/// `[size][count]` header in the narrow form when both fit a byte.
fn write_compound(out: &mut impl BufMut, code8: u8, code32: u8, count: usize, body: &[u8]) {
    if body.len() + 1 <= 0xff && count <= 0xff {
        out.put_u8(code8);
        out.put_u8((body.len() + 1) as u8);
        out.put_u8(count as u8);
    } else {
        out.put_u8(code32);
        out.put_u32((body.len() + 4) as u32);
        out.put_u32(count as u32);
    }
    out.put_slice(body);
}

/// Constructor plus element bodies of an array.
///
/// An empty array is written with a `null` element constructor.
fn array_body(items: &[Value]) -> Result<BytesMut> {
    let mut body = BytesMut::new();
    let Some(first) = items.first() else {
        body.put_u8(NULL);
        return Ok(body);
    };

    if let Value::Described(head) = first {
        let mut inner = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Described(d) if d.descriptor == head.descriptor => inner.push(&d.value),
                other => {
                    return Err(WireError::Encoding(format!(
                        "array of {} cannot hold {}",
                        head.descriptor,
                        other.type_name()
                    )))
                }
            }
        }
        let code = element_code(&inner)?;
        body.put_u8(DESCRIBED);
        write_value(&mut body, &head.descriptor.to_value())?;
        body.put_u8(code);
        for value in inner {
            write_element(&mut body, code, value)?;
        }
        return Ok(body);
    }

    let all: Vec<&Value> = items.iter().collect();
    let code = element_code(&all)?;
    body.put_u8(code);
    for value in all {
        write_element(&mut body, code, value)?;
    }
    Ok(body)
}

/// Shared constructor for a run of values, chosen from the first one.
///
/// Fails for `null` elements, which have no per-element bytes.
fn element_code(values: &[&Value]) -> Result<u8> {
    let short = |v: &&Value| match v {
        Value::Binary(b) => b.len() <= 0xff,
        Value::String(s) => s.len() <= 0xff,
        Value::Symbol(s) => s.as_str().len() <= 0xff,
        _ => false,
    };
    let code = match values.first() {
        Some(Value::Binary(_)) if values.iter().all(short) => VBIN8,
        Some(Value::String(_)) if values.iter().all(short) => STR8,
        Some(Value::Symbol(_)) if values.iter().all(short) => SYM8,
        Some(first) => fixed_code(first),
        None => NULL,
    };
    if !values.is_empty() && is_zero_width(code) {
        return Err(WireError::Encoding(
            "array elements cannot be null".to_string(),
        ));
    }
    Ok(code)
}

/// Fixed-width (or widest) constructor of a value's type.
fn fixed_code(value: &Value) -> u8 {
    match value {
        Value::Null => NULL,
        Value::Bool(_) => BOOLEAN,
        Value::Ubyte(_) => UBYTE,
        Value::Ushort(_) => USHORT,
        Value::Uint(_) => UINT,
        Value::Ulong(_) => ULONG,
        Value::Byte(_) => BYTE,
        Value::Short(_) => SHORT,
        Value::Int(_) => INT,
        Value::Long(_) => LONG,
        Value::Float(_) => FLOAT,
        Value::Double(_) => DOUBLE,
        Value::Decimal32(_) => DECIMAL32,
        Value::Decimal64(_) => DECIMAL64,
        Value::Decimal128(_) => DECIMAL128,
        Value::Char(_) => CHAR,
        Value::Timestamp(_) => TIMESTAMP,
        Value::Uuid(_) => UUID,
        Value::Binary(_) => VBIN32,
        Value::String(_) => STR32,
        Value::Symbol(_) => SYM32,
        Value::List(_) => LIST32,
        Value::Map(_) => MAP32,
        Value::Array(_) => ARRAY32,
        Value::Described(_) => DESCRIBED,
    }
}

/// Write a value's body for an already-written constructor.
fn write_element(out: &mut impl BufMut, code: u8, value: &Value) -> Result<()> {
    match (code, value) {
        (NULL, Value::Null) => {}
        (BOOLEAN, Value::Bool(v)) => out.put_u8(u8::from(*v)),
        (UBYTE, Value::Ubyte(v)) => out.put_u8(*v),
        (USHORT, Value::Ushort(v)) => out.put_u16(*v),
        (UINT, Value::Uint(v)) => out.put_u32(*v),
        (ULONG, Value::Ulong(v)) => out.put_u64(*v),
        (BYTE, Value::Byte(v)) => out.put_i8(*v),
        (SHORT, Value::Short(v)) => out.put_i16(*v),
        (INT, Value::Int(v)) => out.put_i32(*v),
        (LONG, Value::Long(v)) => out.put_i64(*v),
        (FLOAT, Value::Float(v)) => out.put_f32(*v),
        (DOUBLE, Value::Double(v)) => out.put_f64(*v),
        (DECIMAL32, Value::Decimal32(v)) => out.put_slice(v),
        (DECIMAL64, Value::Decimal64(v)) => out.put_slice(v),
        (DECIMAL128, Value::Decimal128(v)) => out.put_slice(v),
        (CHAR, Value::Char(c)) => out.put_u32(u32::from(*c)),
        (TIMESTAMP, Value::Timestamp(v)) => out.put_i64(*v),
        (UUID, Value::Uuid(v)) => out.put_slice(v),
        (VBIN8, Value::Binary(b)) => write_len8(out, b)?,
        (VBIN32, Value::Binary(b)) => write_len32(out, b),
        (STR8, Value::String(s)) => write_len8(out, s.as_bytes())?,
        (STR32, Value::String(s)) => write_len32(out, s.as_bytes()),
        (SYM8, Value::Symbol(s)) => write_len8(out, s.as_str().as_bytes())?,
        (SYM32, Value::Symbol(s)) => write_len32(out, s.as_str().as_bytes()),
        (LIST32, Value::List(items)) => {
            let mut body = BytesMut::new();
            for item in items {
                write_value(&mut body, item)?;
            }
            write_wide(out, items.len(), &body);
        }
        (MAP32, Value::Map(entries)) => {
            let mut body = BytesMut::new();
            for (key, value) in entries {
                write_value(&mut body, key)?;
                write_value(&mut body, value)?;
            }
            write_wide(out, entries.len() * 2, &body);
        }
        (ARRAY32, Value::Array(items)) => {
            let body = array_body(items)?;
            write_wide(out, items.len(), &body);
        }
        (code, other) => {
            return Err(WireError::Encoding(format!(
                "{} does not match array constructor 0x{:02x}",
                other.type_name(),
                code
            )))
        }
    }
    Ok(())
}

fn write_len8(out: &mut impl BufMut, bytes: &[u8]) -> Result<()> {
    let len = u8::try_from(bytes.len())
        .map_err(|_| WireError::Encoding(format!("{} bytes exceed an 8-bit length", bytes.len())))?;
    out.put_u8(len);
    out.put_slice(bytes);
    Ok(())
}

fn write_len32(out: &mut impl BufMut, bytes: &[u8]) {
    out.put_u32(bytes.len() as u32);
    out.put_slice(bytes);
}

fn write_wide(out: &mut impl BufMut, count: usize, body: &[u8]) {
    out.put_u32((body.len() + 4) as u32);
    out.put_u32(count as u32);
    out.put_slice(body);
}
