//! Frame struct with typed accessors.
//!
//! Represents a complete protocol frame with header and payload.
//! Uses `bytes::Bytes` for zero-copy payload sharing.
//!
//! # Example
//!
//! ```
//! use amqp_wire::method::{v0_9_1, MethodBody};
//! use amqp_wire::protocol::{Frame, FrameType};
//!
//! let body = MethodBody::with_defaults(v0_9_1::Method::TxSelect);
//! let frame = Frame::method(1, &body);
//!
//! assert_eq!(frame.frame_type(), FrameType::Method);
//! assert_eq!(frame.channel(), 1);
//! assert_eq!(frame.payload(), &[0, 90, 0, 10]);
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{FrameHeader, FrameType, FRAME_END, FRAME_OVERHEAD};
use crate::method::{MethodBody, MethodTable};

/// A complete protocol frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Decoded header.
    pub header: FrameHeader,
    /// Payload bytes (zero-copy via `bytes::Bytes`).
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from header and payload.
    pub fn new(header: FrameHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// Method frame carrying `[class_id][method_id][fields]`.
    pub fn method<M: MethodTable>(channel: u16, body: &MethodBody<M>) -> Self {
        let payload = body.encode_payload();
        Self::new(
            FrameHeader::new(FrameType::Method, channel, payload.len() as u32),
            payload,
        )
    }

    /// Heartbeat frame (channel 0, empty payload).
    pub fn heartbeat() -> Self {
        Self::new(FrameHeader::new(FrameType::Heartbeat, 0, 0), Bytes::new())
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get a clone of the payload as Bytes (cheap, zero-copy).
    #[inline]
    pub fn payload_bytes(&self) -> Bytes {
        self.payload.clone()
    }

    /// Get the frame type.
    #[inline]
    pub fn frame_type(&self) -> FrameType {
        self.header.frame_type
    }

    /// Get the channel.
    #[inline]
    pub fn channel(&self) -> u16 {
        self.header.channel
    }

    /// Check if this is a heartbeat.
    #[inline]
    pub fn is_heartbeat(&self) -> bool {
        self.header.frame_type == FrameType::Heartbeat
    }

    /// Encode header, payload and frame-end octet.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(FRAME_OVERHEAD + self.payload.len());
        buf.put_slice(&self.header.encode());
        buf.put_slice(&self.payload);
        buf.put_u8(FRAME_END);
        buf.freeze()
    }
}

/// Build a complete frame as a single byte vector.
///
/// # Example
///
/// ```
/// use amqp_wire::protocol::{build_frame, FrameType};
///
/// let bytes = build_frame(FrameType::Body, 1, b"hello");
/// assert_eq!(bytes.len(), 7 + 5 + 1); // header + payload + frame end
/// assert_eq!(bytes.last(), Some(&0xCE));
/// ```
pub fn build_frame(frame_type: FrameType, channel: u16, payload: &[u8]) -> Vec<u8> {
    let header = FrameHeader::new(frame_type, channel, payload.len() as u32);
    let mut buf = Vec::with_capacity(FRAME_OVERHEAD + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    buf.push(FRAME_END);
    buf
}
