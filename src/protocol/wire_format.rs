//! Wire format encoding and decoding.
//!
//! Implements the 7-byte frame header of the 0-8 / 0-9-1 framing:
//! ```text
//! ┌────────┬──────────┬──────────┬─────────────┬──────┐
//! │ Type   │ Channel  │ Size     │ Payload     │ End  │
//! │ 1 byte │ 2 bytes  │ 4 bytes  │ Size bytes  │ 0xCE │
//! │        │ uint16 BE│ uint32 BE│             │      │
//! └────────┴──────────┴──────────┴─────────────┴──────┘
//! ```
//!
//! and the 8-byte protocol header a client sends before any frame.
//!
//! All multi-byte integers are Big Endian.

use super::version::ProtocolVersion;
use crate::error::{Result, WireError};

/// Frame header size in bytes (fixed, exactly 7).
pub const HEADER_SIZE: usize = 7;

/// Octet that terminates every frame.
pub const FRAME_END: u8 = 0xCE;

/// Header plus frame-end octet.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + 1;

/// Protocol header size in bytes.
pub const PROTOCOL_HEADER_SIZE: usize = 8;

/// Frame kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameType {
    /// `[class_id][method_id][fields]`
    Method = 1,
    /// Content header (properties).
    Header = 2,
    /// Content body chunk.
    Body = 3,
    /// Keep-alive, always on channel 0 with an empty payload.
    Heartbeat = 8,
}

impl FrameType {
    /// Parse the type octet.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(FrameType::Method),
            2 => Ok(FrameType::Header),
            3 => Ok(FrameType::Body),
            8 => Ok(FrameType::Heartbeat),
            other => Err(WireError::MalformedFrame(format!(
                "unknown frame type {}",
                other
            ))),
        }
    }
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Frame kind.
    pub frame_type: FrameType,
    /// Channel number (0 = connection).
    pub channel: u16,
    /// Payload length in bytes.
    pub size: u32,
}

impl FrameHeader {
    /// Create a new header.
    pub fn new(frame_type: FrameType, channel: u16, size: u32) -> Self {
        Self {
            frame_type,
            channel,
            size,
        }
    }

    /// Encode header to bytes (Big Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use amqp_wire::protocol::{FrameHeader, FrameType};
    ///
    /// let header = FrameHeader::new(FrameType::Method, 1, 100);
    /// assert_eq!(header.encode(), [1, 0, 1, 0, 0, 0, 100]);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = self.frame_type as u8;
        buf[1..3].copy_from_slice(&self.channel.to_be_bytes());
        buf[3..7].copy_from_slice(&self.size.to_be_bytes());
        buf
    }

    /// Decode header from bytes (Big Endian).
    ///
    /// Returns `Ok(None)` if the buffer is too short.
    pub fn decode(buf: &[u8]) -> Result<Option<Self>> {
        if buf.len() < HEADER_SIZE {
            return Ok(None);
        }
        Ok(Some(Self {
            frame_type: FrameType::from_u8(buf[0])?,
            channel: u16::from_be_bytes([buf[1], buf[2]]),
            size: u32::from_be_bytes([buf[3], buf[4], buf[5], buf[6]]),
        }))
    }

    /// Validate the header against the negotiated maximum frame size.
    ///
    /// `max_frame_size` covers the whole frame, header and end octet included.
    pub fn validate(&self, max_frame_size: u32) -> Result<()> {
        let total = self.size as u64 + FRAME_OVERHEAD as u64;
        if total > max_frame_size as u64 {
            return Err(WireError::FrameTooLarge {
                size: self.size,
                max: max_frame_size,
            });
        }

        if self.frame_type == FrameType::Heartbeat && (self.channel != 0 || self.size != 0) {
            return Err(WireError::MalformedFrame(format!(
                "heartbeat on channel {} with {} byte payload",
                self.channel, self.size
            )));
        }

        Ok(())
    }
}

/// The `AMQP` + version greeting that opens a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolHeader {
    /// Version announced.
    pub version: ProtocolVersion,
}

impl ProtocolHeader {
    /// Greeting for a version.
    pub fn for_version(version: ProtocolVersion) -> Self {
        Self { version }
    }

    /// Encode to the 8 greeting bytes.
    ///
    /// 0-8 uses the legacy `class=1, instance=1` layout; later versions send
    /// `0, major, minor, revision`.
    pub fn encode(&self) -> [u8; PROTOCOL_HEADER_SIZE] {
        let v = self.version;
        let tail = if v == ProtocolVersion::V0_8 {
            [1, 1, v.major, v.minor]
        } else {
            [0, v.major, v.minor, v.revision]
        };
        let mut buf = [0u8; PROTOCOL_HEADER_SIZE];
        buf[..4].copy_from_slice(b"AMQP");
        buf[4..].copy_from_slice(&tail);
        buf
    }

    /// Decode the 8 greeting bytes.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < PROTOCOL_HEADER_SIZE {
            return Err(WireError::truncated(PROTOCOL_HEADER_SIZE, buf.len()));
        }
        if &buf[..4] != b"AMQP" {
            return Err(WireError::MalformedFrame(
                "protocol header must start with AMQP".to_string(),
            ));
        }
        let version = match buf[4..8] {
            [1, 1, major, minor] => ProtocolVersion::new(major, minor, 0),
            [0, major, minor, revision] => ProtocolVersion::new(major, minor, revision),
            _ => {
                return Err(WireError::MalformedFrame(format!(
                    "unrecognised protocol header {:?}",
                    &buf[4..8]
                )))
            }
        };
        Ok(Self { version })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode_roundtrip() {
        let original = FrameHeader::new(FrameType::Body, 42, 100);
        let encoded = original.encode();
        let decoded = FrameHeader::decode(&encoded).unwrap().unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_header_big_endian_byte_order() {
        let header = FrameHeader::new(FrameType::Header, 0x0102, 0x03040506);
        let bytes = header.encode();
        assert_eq!(bytes, [2, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    }

    #[test]
    fn test_decode_too_short_buffer() {
        let buf = [1u8; 6];
        assert!(FrameHeader::decode(&buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_unknown_frame_type() {
        let buf = [9u8, 0, 0, 0, 0, 0, 0];
        let err = FrameHeader::decode(&buf).unwrap_err();
        assert!(err.to_string().contains("unknown frame type 9"));
    }

    #[test]
    fn test_validate_frame_too_large() {
        let header = FrameHeader::new(FrameType::Body, 1, 4096);
        assert!(header.validate(4096 + FRAME_OVERHEAD as u32).is_ok());
        let err = header.validate(4096).unwrap_err();
        assert!(matches!(err, WireError::FrameTooLarge { size: 4096, .. }));
    }

    #[test]
    fn test_validate_heartbeat_shape() {
        assert!(FrameHeader::new(FrameType::Heartbeat, 0, 0)
            .validate(4096)
            .is_ok());
        assert!(FrameHeader::new(FrameType::Heartbeat, 3, 0)
            .validate(4096)
            .is_err());
    }

    #[test]
    fn test_protocol_header_bytes() {
        assert_eq!(
            ProtocolHeader::for_version(ProtocolVersion::V0_9_1).encode(),
            *b"AMQP\x00\x00\x09\x01"
        );
        assert_eq!(
            ProtocolHeader::for_version(ProtocolVersion::V0_8).encode(),
            *b"AMQP\x01\x01\x00\x08"
        );
    }

    #[test]
    fn test_protocol_header_decode() {
        let header = ProtocolHeader::decode(b"AMQP\x01\x01\x00\x08").unwrap();
        assert_eq!(header.version, ProtocolVersion::V0_8);
        let header = ProtocolHeader::decode(b"AMQP\x00\x00\x09\x01").unwrap();
        assert_eq!(header.version, ProtocolVersion::V0_9_1);

        assert!(ProtocolHeader::decode(b"HTTP/1.1").is_err());
        assert!(matches!(
            ProtocolHeader::decode(b"AMQP"),
            Err(WireError::TruncatedInput { .. })
        ));
    }
}
