//! Typed field values held by a method body.

use bytes::Bytes;
use serde::{Serialize, Serializer};

use super::schema::FieldKind;
use crate::codec::ShortString;

/// An encoded field table, carried opaque.
///
/// The 0-8 and 0-9-1 table type codes disagree on several entries, so the
/// codec keeps the raw bytes (without the u32 length prefix) and leaves
/// interpretation to the layer that knows the negotiated version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldTable(Bytes);

impl FieldTable {
    /// Wrap already-encoded table entries.
    pub fn from_raw(raw: Bytes) -> Self {
        Self(raw)
    }

    /// An empty table.
    pub fn empty() -> Self {
        Self(Bytes::new())
    }

    /// Encoded entries.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encoded entries as cheap `Bytes` clone.
    #[inline]
    pub fn raw(&self) -> Bytes {
        self.0.clone()
    }

    /// Check if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One field value of a method body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// `octet`
    Octet(u8),
    /// `short`
    Short(u16),
    /// `long`
    Long(u32),
    /// `longlong`
    LongLong(u64),
    /// `timestamp`
    Timestamp(u64),
    /// `shortstr`
    ShortStr(ShortString),
    /// `longstr`
    LongStr(Bytes),
    /// `table`
    Table(FieldTable),
    /// `bit`
    Bit(bool),
}

impl FieldValue {
    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Octet(_) => FieldKind::Octet,
            FieldValue::Short(_) => FieldKind::Short,
            FieldValue::Long(_) => FieldKind::Long,
            FieldValue::LongLong(_) => FieldKind::LongLong,
            FieldValue::Timestamp(_) => FieldKind::Timestamp,
            FieldValue::ShortStr(_) => FieldKind::ShortStr,
            FieldValue::LongStr(_) => FieldKind::LongStr,
            FieldValue::Table(_) => FieldKind::Table,
            FieldValue::Bit(_) => FieldKind::Bit,
        }
    }

    /// Zero value of a kind: `0`, empty string/table, or `false`.
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Octet => FieldValue::Octet(0),
            FieldKind::Short => FieldValue::Short(0),
            FieldKind::Long => FieldValue::Long(0),
            FieldKind::LongLong => FieldValue::LongLong(0),
            FieldKind::Timestamp => FieldValue::Timestamp(0),
            FieldKind::ShortStr => FieldValue::ShortStr(ShortString::empty()),
            FieldKind::LongStr => FieldValue::LongStr(Bytes::new()),
            FieldKind::Table => FieldValue::Table(FieldTable::empty()),
            FieldKind::Bit => FieldValue::Bit(false),
        }
    }

    /// Convert into `kind` where the representation is identical
    /// (a `u64` given for a timestamp field); otherwise return `self`.
    pub(crate) fn coerce(self, kind: FieldKind) -> Self {
        match (self, kind) {
            (FieldValue::LongLong(v), FieldKind::Timestamp) => FieldValue::Timestamp(v),
            (FieldValue::Timestamp(v), FieldKind::LongLong) => FieldValue::LongLong(v),
            (value, _) => value,
        }
    }

    /// Bytes this value occupies on the wire (bits are counted per group by
    /// the body, so a lone `Bit` reports 0).
    pub fn encoded_len(&self) -> usize {
        match self {
            FieldValue::Octet(_) => 1,
            FieldValue::Short(_) => 2,
            FieldValue::Long(_) => 4,
            FieldValue::LongLong(_) | FieldValue::Timestamp(_) => 8,
            FieldValue::ShortStr(s) => s.encoded_len(),
            FieldValue::LongStr(b) => 4 + b.len(),
            FieldValue::Table(t) => 4 + t.as_bytes().len(),
            FieldValue::Bit(_) => 0,
        }
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Octet(v)
    }
}

impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        FieldValue::Short(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Long(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::LongLong(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bit(v)
    }
}

impl From<ShortString> for FieldValue {
    fn from(v: ShortString) -> Self {
        FieldValue::ShortStr(v)
    }
}

impl From<Bytes> for FieldValue {
    fn from(v: Bytes) -> Self {
        FieldValue::LongStr(v)
    }
}

impl From<FieldTable> for FieldValue {
    fn from(v: FieldTable) -> Self {
        FieldValue::Table(v)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Octet(v) => serializer.serialize_u8(*v),
            FieldValue::Short(v) => serializer.serialize_u16(*v),
            FieldValue::Long(v) => serializer.serialize_u32(*v),
            FieldValue::LongLong(v) | FieldValue::Timestamp(v) => serializer.serialize_u64(*v),
            FieldValue::ShortStr(s) => s.serialize(serializer),
            FieldValue::LongStr(b) => serializer.serialize_bytes(b),
            FieldValue::Table(t) => serializer.serialize_bytes(t.as_bytes()),
            FieldValue::Bit(v) => serializer.serialize_bool(*v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions_pick_kind_by_width() {
        assert_eq!(FieldValue::from(1u8).kind(), FieldKind::Octet);
        assert_eq!(FieldValue::from(1u16).kind(), FieldKind::Short);
        assert_eq!(FieldValue::from(1u32).kind(), FieldKind::Long);
        assert_eq!(FieldValue::from(1u64).kind(), FieldKind::LongLong);
        assert_eq!(FieldValue::from(true).kind(), FieldKind::Bit);
    }

    #[test]
    fn test_defaults_match_kind() {
        for kind in [
            FieldKind::Octet,
            FieldKind::Short,
            FieldKind::Long,
            FieldKind::LongLong,
            FieldKind::Timestamp,
            FieldKind::ShortStr,
            FieldKind::LongStr,
            FieldKind::Table,
            FieldKind::Bit,
        ] {
            assert_eq!(FieldValue::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_coerce_longlong_to_timestamp() {
        let v = FieldValue::from(42u64).coerce(FieldKind::Timestamp);
        assert_eq!(v, FieldValue::Timestamp(42));
        // Unrelated kinds are left alone
        let v = FieldValue::from(1u8).coerce(FieldKind::Short);
        assert_eq!(v, FieldValue::Octet(1));
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(FieldValue::Short(0).encoded_len(), 2);
        assert_eq!(
            FieldValue::ShortStr(ShortString::new("abc").unwrap()).encoded_len(),
            4
        );
        assert_eq!(
            FieldValue::LongStr(Bytes::from_static(b"abc")).encoded_len(),
            7
        );
        assert_eq!(FieldValue::Table(FieldTable::empty()).encoded_len(), 4);
    }
}
