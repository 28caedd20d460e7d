//! Short string - UTF-8 text carried with a single length octet.

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};

use crate::error::{Result, WireError};

/// Maximum encoded length of a short string in bytes.
pub const SHORT_STRING_MAX_LEN: usize = 255;

/// Text limited to 255 bytes, encoded as `[len:u8][bytes]`.
///
/// The length limit is checked once, at construction, so encoding a
/// `ShortString` can never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortString(String);

impl ShortString {
    /// Create a short string, rejecting text longer than 255 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use amqp_wire::codec::ShortString;
    ///
    /// assert!(ShortString::new("amq.direct").is_ok());
    /// assert!(ShortString::new("x".repeat(256)).is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.len() > SHORT_STRING_MAX_LEN {
            return Err(WireError::Encoding(format!(
                "Short string length {} exceeds maximum {}",
                text.len(),
                SHORT_STRING_MAX_LEN
            )));
        }
        Ok(Self(text))
    }

    /// Empty short string.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Borrow as `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bytes on the wire, including the length octet.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        1 + self.0.len()
    }

    /// Consume into the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for ShortString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ShortString {
    type Error = WireError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for ShortString {
    type Error = WireError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl Serialize for ShortString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_length_accepted() {
        let s = ShortString::new("a".repeat(255)).unwrap();
        assert_eq!(s.len(), 255);
        assert_eq!(s.encoded_len(), 256);
    }

    #[test]
    fn test_over_max_rejected() {
        let err = ShortString::new("a".repeat(256)).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_length_counts_bytes_not_chars() {
        // 128 two-byte chars = 256 bytes
        let text = "é".repeat(128);
        assert!(ShortString::new(text).is_err());
    }

    #[test]
    fn test_empty() {
        let s = ShortString::empty();
        assert!(s.is_empty());
        assert_eq!(s.encoded_len(), 1);
        assert_eq!(s, ShortString::default());
    }

    #[test]
    fn test_display_and_deref() {
        let s = ShortString::try_from("amq.topic").unwrap();
        assert_eq!(s.to_string(), "amq.topic");
        assert!(s.starts_with("amq."));
    }
}
