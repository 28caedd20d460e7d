//! Generic method body driven by a per-version schema table.
//!
//! One `MethodBody<M>` type serves every (class, method) pair of a version:
//! the method tag `M` selects a [`MethodSpec`], and that `MethodSpec` drives decode,
//! encode, size computation and dispatch.
//!
//! # Example
//!
//! ```
//! use amqp_wire::method::{v0_8, MethodBody};
//!
//! let body = MethodBody::builder(v0_8::Method::FilePublish)
//!     .set("ticket", 0u16)
//!     .set_str("exchange", "amq.direct")
//!     .set_str("routing_key", "test")
//!     .set("mandatory", true)
//!     .set_str("identifier", "id1")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(body.class_id(), 70);
//! assert_eq!(body.method_id(), 60);
//! assert_eq!(body.body_size(), 23);
//! ```

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::schema::{FieldKind, FieldSpec, MethodSpec, MethodTable};
use super::value::{FieldTable, FieldValue};
use crate::codec::{writer, ShortString, WireReader};
use crate::error::{Result, WireError};

/// Size of the `[class_id:u16][method_id:u16]` prefix of a method payload.
pub const METHOD_PREFIX_SIZE: usize = 4;

/// One decoded or constructed protocol operation.
///
/// Immutable once built: there are no `&mut` accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBody<M: MethodTable> {
    method: M,
    values: Vec<FieldValue>,
}

impl<M: MethodTable> MethodBody<M> {
    /// Build a body from values given in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `FieldMismatch` if the count or any kind disagrees with the
    /// method's schema.
    pub fn new(method: M, values: Vec<FieldValue>) -> Result<Self> {
        let spec = method.spec();
        if values.len() != spec.fields.len() {
            return Err(WireError::FieldMismatch {
                method: spec.name,
                field: format!("<{} values>", values.len()),
                expected: "one value per declared field",
            });
        }
        let values = values
            .into_iter()
            .zip(spec.fields)
            .map(|(value, field)| check_kind(spec, field, value.coerce(field.kind)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { method, values })
    }

    /// Start a builder with every field at its zero value.
    pub fn builder(method: M) -> MethodBodyBuilder<M> {
        MethodBodyBuilder::new(method)
    }

    /// Body for a method that declares no fields, or with all defaults.
    pub fn with_defaults(method: M) -> Self {
        let values = method
            .spec()
            .fields
            .iter()
            .map(|f| FieldValue::default_for(f.kind))
            .collect();
        Self { method, values }
    }

    /// Method tag.
    #[inline]
    pub fn method(&self) -> M {
        self.method
    }

    /// Static schema of this body.
    #[inline]
    pub fn spec(&self) -> &'static MethodSpec {
        self.method.spec()
    }

    /// Dotted method name, e.g. `basic.publish`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Protocol class identifier.
    #[inline]
    pub fn class_id(&self) -> u16 {
        self.spec().class_id
    }

    /// Protocol method identifier.
    #[inline]
    pub fn method_id(&self) -> u16 {
        self.spec().method_id
    }

    /// Values in declaration order.
    #[inline]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// `(schema, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> {
        self.spec().fields.iter().zip(self.values.iter())
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.spec()
            .field_index(name)
            .and_then(|i| self.values.get(i))
    }

    /// `octet` field by name.
    pub fn octet(&self, name: &str) -> Option<u8> {
        match self.get(name)? {
            FieldValue::Octet(v) => Some(*v),
            _ => None,
        }
    }

    /// `short` field by name.
    pub fn short(&self, name: &str) -> Option<u16> {
        match self.get(name)? {
            FieldValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// `long` field by name.
    pub fn long(&self, name: &str) -> Option<u32> {
        match self.get(name)? {
            FieldValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// `longlong` field by name.
    pub fn long_long(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            FieldValue::LongLong(v) => Some(*v),
            _ => None,
        }
    }

    /// `timestamp` field by name.
    pub fn timestamp(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            FieldValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// `bit` field by name.
    pub fn bit(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            FieldValue::Bit(v) => Some(*v),
            _ => None,
        }
    }

    /// `shortstr` field by name.
    pub fn short_str(&self, name: &str) -> Option<&ShortString> {
        match self.get(name)? {
            FieldValue::ShortStr(v) => Some(v),
            _ => None,
        }
    }

    /// `longstr` field by name.
    pub fn long_str(&self, name: &str) -> Option<&Bytes> {
        match self.get(name)? {
            FieldValue::LongStr(v) => Some(v),
            _ => None,
        }
    }

    /// `table` field by name.
    pub fn table(&self, name: &str) -> Option<&FieldTable> {
        match self.get(name)? {
            FieldValue::Table(v) => Some(v),
            _ => None,
        }
    }

    /// Decode the fields of `method` from the reader.
    ///
    /// Consecutive bit fields share one octet per eight flags; any other
    /// field closes the group.
    pub(crate) fn decode_fields(method: M, reader: &mut WireReader) -> Result<Self> {
        let spec = method.spec();
        let mut values = Vec::with_capacity(spec.fields.len());
        // (packed octet, index of the next bit to read)
        let mut bits: Option<(u8, u8)> = None;

        for field in spec.fields {
            let value = match field.kind {
                FieldKind::Bit => {
                    let (octet, index) = match bits {
                        Some((octet, index)) if index < 8 => (octet, index),
                        _ => (reader.read_bitfield()?, 0),
                    };
                    bits = Some((octet, index + 1));
                    FieldValue::Bit(octet & (1 << index) != 0)
                }
                kind => {
                    bits = None;
                    read_value(kind, reader)?
                }
            };
            values.push(value);
        }

        Ok(Self { method, values })
    }

    /// Exact number of bytes [`write_payload`](Self::write_payload) emits.
    pub fn body_size(&self) -> usize {
        let mut size = 0;
        let mut bits_in_group = 0usize;
        for value in &self.values {
            if let FieldValue::Bit(_) = value {
                if bits_in_group % 8 == 0 {
                    size += 1;
                }
                bits_in_group += 1;
            } else {
                bits_in_group = 0;
                size += value.encoded_len();
            }
        }
        size
    }

    /// Write the method fields (without the class/method prefix).
    pub fn write_payload(&self, out: &mut impl BufMut) {
        let mut pending: Option<(u8, u8)> = None;

        for value in &self.values {
            if let FieldValue::Bit(flag) = value {
                let (mut octet, index) = match pending {
                    Some((octet, index)) if index < 8 => (octet, index),
                    Some((full, _)) => {
                        writer::write_bitfield(out, full);
                        (0, 0)
                    }
                    None => (0, 0),
                };
                if *flag {
                    octet |= 1 << index;
                }
                pending = Some((octet, index + 1));
                continue;
            }

            if let Some((octet, _)) = pending.take() {
                writer::write_bitfield(out, octet);
            }
            write_value(value, out);
        }

        if let Some((octet, _)) = pending {
            writer::write_bitfield(out, octet);
        }
    }

    /// Encode `[class_id][method_id][fields]` as a frame payload.
    pub fn encode_payload(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(METHOD_PREFIX_SIZE + self.body_size());
        writer::write_u16(&mut out, self.class_id());
        writer::write_u16(&mut out, self.method_id());
        self.write_payload(&mut out);
        out.freeze()
    }
}

fn check_kind(spec: &MethodSpec, field: &FieldSpec, value: FieldValue) -> Result<FieldValue> {
    if value.kind() != field.kind {
        return Err(WireError::FieldMismatch {
            method: spec.name,
            field: field.name.to_string(),
            expected: field.kind.name(),
        });
    }
    Ok(value)
}

fn read_value(kind: FieldKind, reader: &mut WireReader) -> Result<FieldValue> {
    Ok(match kind {
        FieldKind::Octet => FieldValue::Octet(reader.read_u8()?),
        FieldKind::Short => FieldValue::Short(reader.read_u16()?),
        FieldKind::Long => FieldValue::Long(reader.read_u32()?),
        FieldKind::LongLong => FieldValue::LongLong(reader.read_u64()?),
        FieldKind::Timestamp => FieldValue::Timestamp(reader.read_u64()?),
        FieldKind::ShortStr => FieldValue::ShortStr(reader.read_short_string()?),
        FieldKind::LongStr => FieldValue::LongStr(reader.read_long_string()?),
        FieldKind::Table => FieldValue::Table(FieldTable::from_raw(reader.read_long_string()?)),
        FieldKind::Bit => FieldValue::Bit(reader.read_bitfield()? & 1 != 0),
    })
}

fn write_value(value: &FieldValue, out: &mut impl BufMut) {
    match value {
        FieldValue::Octet(v) => writer::write_u8(out, *v),
        FieldValue::Short(v) => writer::write_u16(out, *v),
        FieldValue::Long(v) => writer::write_u32(out, *v),
        FieldValue::LongLong(v) | FieldValue::Timestamp(v) => writer::write_u64(out, *v),
        FieldValue::ShortStr(s) => writer::write_short_string(out, s),
        FieldValue::LongStr(b) => writer::write_long_string(out, b),
        FieldValue::Table(t) => writer::write_long_string(out, t.as_bytes()),
        FieldValue::Bit(v) => writer::write_bitfield(out, u8::from(*v)),
    }
}

impl<M: MethodTable> fmt::Display for MethodBody<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, (field, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=", field.name)?;
            match value {
                FieldValue::Octet(v) => write!(f, "{}", v)?,
                FieldValue::Short(v) => write!(f, "{}", v)?,
                FieldValue::Long(v) => write!(f, "{}", v)?,
                FieldValue::LongLong(v) | FieldValue::Timestamp(v) => write!(f, "{}", v)?,
                FieldValue::ShortStr(s) => write!(f, "{}", s)?,
                FieldValue::LongStr(b) => write!(f, "<{} bytes>", b.len())?,
                FieldValue::Table(t) => write!(f, "<table {} bytes>", t.as_bytes().len())?,
                FieldValue::Bit(v) => write!(f, "{}", v)?,
            }
        }
        f.write_str(")")
    }
}

impl<M: MethodTable> Serialize for MethodBody<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.values.len()))?;
        map.serialize_entry("method", self.name())?;
        map.serialize_entry("class_id", &self.class_id())?;
        map.serialize_entry("method_id", &self.method_id())?;
        for (field, value) in self.fields() {
            map.serialize_entry(field.name, value)?;
        }
        map.end()
    }
}

/// Named-field builder for client-side construction.
///
/// Unset fields keep their zero value. The first error (unknown field,
/// wrong kind, oversized short string) is reported by [`build`](Self::build).
#[derive(Debug)]
pub struct MethodBodyBuilder<M: MethodTable> {
    body: MethodBody<M>,
    error: Option<WireError>,
}

impl<M: MethodTable> MethodBodyBuilder<M> {
    fn new(method: M) -> Self {
        Self {
            body: MethodBody::with_defaults(method),
            error: None,
        }
    }

    /// Set a field by name.
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let spec = self.body.spec();
        match spec.field_index(name) {
            Some(i) => {
                let field = &spec.fields[i];
                match check_kind(spec, field, value.into().coerce(field.kind)) {
                    Ok(value) => self.body.values[i] = value,
                    Err(e) => self.error = Some(e),
                }
            }
            None => {
                self.error = Some(WireError::FieldMismatch {
                    method: spec.name,
                    field: name.to_string(),
                    expected: "a declared field",
                })
            }
        }
        self
    }

    /// Set a `shortstr` field from text.
    pub fn set_str(mut self, name: &str, value: &str) -> Self {
        match ShortString::new(value) {
            Ok(s) => self.set(name, s),
            Err(e) => {
                self.error.get_or_insert(e);
                self
            }
        }
    }

    /// Finish the body.
    pub fn build(self) -> Result<MethodBody<M>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.body),
        }
    }
}
