//! Frame buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for zero-copy buffer management.
//! Implements a state machine for handling fragmented frames:
//! - `WaitingForHeader`: Need at least 7 bytes
//! - `WaitingForPayload`: Header parsed, need N payload bytes plus the
//!   frame-end octet
//!
//! # Example
//!
//! ```
//! use amqp_wire::protocol::{build_frame, FrameBuffer, FrameType};
//!
//! let mut buffer = FrameBuffer::new();
//! let bytes = build_frame(FrameType::Body, 1, b"chunk");
//!
//! // Data arrives in pieces from the socket
//! assert!(buffer.push(&bytes[..4]).unwrap().is_empty());
//! let frames = buffer.push(&bytes[4..]).unwrap();
//! assert_eq!(frames[0].payload(), b"chunk");
//! ```

use bytes::BytesMut;

use super::wire_format::{FrameHeader, FRAME_END, HEADER_SIZE};
use super::Frame;
use crate::config::{CodecConfig, DEFAULT_MAX_FRAME_SIZE};
use crate::error::{Result, WireError};

/// State machine for frame parsing.
#[derive(Debug, Clone)]
enum State {
    /// Waiting for complete header (need 7 bytes).
    WaitingForHeader,
    /// Header parsed, waiting for payload bytes and the frame end.
    WaitingForPayload { header: FrameHeader },
}

/// Buffer for accumulating incoming bytes and extracting complete frames.
///
/// After an error the byte stream can no longer be trusted; the caller is
/// expected to close the connection (or [`clear`](Self::clear) the buffer).
#[derive(Debug)]
pub struct FrameBuffer {
    /// Accumulated bytes from socket reads.
    buffer: BytesMut,
    /// Current parsing state.
    state: State,
    /// Maximum allowed frame size, header and frame end included.
    max_frame_size: u32,
}

impl FrameBuffer {
    /// Create a new frame buffer with the default maximum frame size.
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create a new frame buffer with a custom maximum frame size.
    pub fn with_max_frame_size(max_frame_size: u32) -> Self {
        Self {
            buffer: BytesMut::with_capacity(64 * 1024),
            state: State::WaitingForHeader,
            max_frame_size,
        }
    }

    /// Create a frame buffer sized from the codec configuration.
    pub fn from_config(config: &CodecConfig) -> Self {
        Self::with_max_frame_size(config.max_frame_size)
    }

    /// Push data into the buffer and extract all complete frames.
    ///
    /// Returns a vector of complete frames. If data is fragmented,
    /// partial data is buffered internally for the next push.
    ///
    /// # Errors
    ///
    /// - `FrameTooLarge` if a header announces a frame above the maximum.
    /// - `MalformedFrame` for an unknown frame type, a heartbeat with a
    ///   payload, or a missing frame-end octet.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Frame>> {
        self.extend(data);

        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }

        Ok(frames)
    }

    /// Append bytes without extracting anything.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Extract the next complete frame, if the buffer holds one.
    ///
    /// Frames ahead of a malformed one are returned by earlier calls, so a
    /// caller pulling one frame at a time keeps them when a later frame
    /// fails.
    ///
    /// # Errors
    ///
    /// Same as [`push`](Self::push).
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        self.try_extract_one()
    }

    /// Try to extract a single frame from the buffer.
    fn try_extract_one(&mut self) -> Result<Option<Frame>> {
        match &self.state {
            State::WaitingForHeader => {
                let Some(header) = FrameHeader::decode(&self.buffer)? else {
                    return Ok(None);
                };
                header.validate(self.max_frame_size)?;

                let _ = self.buffer.split_to(HEADER_SIZE);
                self.state = State::WaitingForPayload { header };

                self.try_extract_one()
            }

            State::WaitingForPayload { header } => {
                let header = *header;
                let size = header.size as usize;

                // payload + frame end
                if self.buffer.len() < size + 1 {
                    return Ok(None);
                }

                let end = self.buffer[size];
                if end != FRAME_END {
                    return Err(WireError::MalformedFrame(format!(
                        "expected frame end 0x{:02X}, found 0x{:02X}",
                        FRAME_END, end
                    )));
                }

                let payload = self.buffer.split_to(size).freeze();
                let _ = self.buffer.split_to(1);
                self.state = State::WaitingForHeader;

                Ok(Some(Frame::new(header, payload)))
            }
        }
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Maximum frame size this buffer accepts.
    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::WaitingForHeader;
    }

    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::WaitingForHeader => "WaitingForHeader",
            State::WaitingForPayload { .. } => "WaitingForPayload",
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{build_frame, FrameType};

    #[test]
    fn test_single_complete_frame() {
        let mut buffer = FrameBuffer::new();
        let bytes = build_frame(FrameType::Method, 1, b"hello");

        let frames = buffer.push(&bytes).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].channel(), 1);
        assert_eq!(&frames[0].payload[..], b"hello");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_multiple_frames_in_one_push() {
        let mut buffer = FrameBuffer::new();

        let mut combined = build_frame(FrameType::Method, 1, b"first");
        combined.extend(build_frame(FrameType::Header, 2, b"second"));
        combined.extend(build_frame(FrameType::Body, 3, b"third"));

        let frames = buffer.push(&combined).unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].channel(), 1);
        assert_eq!(frames[1].frame_type(), FrameType::Header);
        assert_eq!(frames[2].payload(), b"third");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fragmented_header() {
        let mut buffer = FrameBuffer::new();
        let bytes = build_frame(FrameType::Body, 42, b"test");

        let frames = buffer.push(&bytes[..5]).unwrap();
        assert!(frames.is_empty());
        assert_eq!(buffer.state_name(), "WaitingForHeader");

        let frames = buffer.push(&bytes[5..]).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].channel(), 42);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fragmented_payload_waits_for_frame_end() {
        let mut buffer = FrameBuffer::new();
        let payload = b"this is a longer payload that will be fragmented";
        let bytes = build_frame(FrameType::Body, 1, payload);

        // Everything but the frame-end octet
        let frames = buffer.push(&bytes[..bytes.len() - 1]).unwrap();
        assert!(frames.is_empty());
        assert_eq!(buffer.state_name(), "WaitingForPayload");

        let frames = buffer.push(&bytes[bytes.len() - 1..]).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0].payload[..], payload);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_heartbeat_frame() {
        let mut buffer = FrameBuffer::new();
        let frames = buffer.push(&build_frame(FrameType::Heartbeat, 0, b"")).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].is_heartbeat());
        assert!(frames[0].payload.is_empty());
    }

    #[test]
    fn test_bad_frame_end() {
        let mut buffer = FrameBuffer::new();
        let mut bytes = build_frame(FrameType::Body, 1, b"abc");
        let last = bytes.len() - 1;
        bytes[last] = 0x00;

        let err = buffer.push(&bytes).unwrap_err();
        assert!(matches!(err, WireError::MalformedFrame(_)));
        assert!(err.to_string().contains("frame end"));
    }

    #[test]
    fn test_next_frame_yields_frames_ahead_of_a_bad_one() {
        let mut bytes = build_frame(FrameType::Method, 1, b"good");
        let bad = bytes.len();
        bytes.extend(build_frame(FrameType::Body, 2, b"x"));
        bytes[bad] = 9;

        let mut buffer = FrameBuffer::new();
        buffer.extend(&bytes);
        let frame = buffer.next_frame().unwrap().unwrap();
        assert_eq!(frame.payload(), b"good");
        assert!(matches!(buffer.next_frame(), Err(WireError::MalformedFrame(_))));

        let mut buffer = FrameBuffer::new();
        assert!(buffer.push(&bytes).is_err());
    }

    #[test]
    fn test_max_frame_size_validation() {
        let mut buffer = FrameBuffer::with_max_frame_size(4096);

        let header = FrameHeader::new(FrameType::Body, 1, 10_000);
        let err = buffer.push(&header.encode()).unwrap_err();

        assert!(matches!(
            err,
            WireError::FrameTooLarge {
                size: 10_000,
                max: 4096
            }
        ));
    }

    #[test]
    fn test_from_config() {
        let config = CodecConfig {
            max_frame_size: 8192,
            ..CodecConfig::default()
        };
        assert_eq!(FrameBuffer::from_config(&config).max_frame_size(), 8192);
    }

    #[test]
    fn test_clear_resets_state() {
        let mut buffer = FrameBuffer::new();
        let bytes = build_frame(FrameType::Body, 1, b"test");

        buffer.push(&bytes[..HEADER_SIZE]).unwrap();
        assert_eq!(buffer.state_name(), "WaitingForPayload");

        buffer.clear();

        assert_eq!(buffer.state_name(), "WaitingForHeader");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut buffer = FrameBuffer::new();
        let bytes = build_frame(FrameType::Body, 7, b"hi");

        let mut all_frames = Vec::new();
        for byte in &bytes {
            all_frames.extend(buffer.push(&[*byte]).unwrap());
        }

        assert_eq!(all_frames.len(), 1);
        assert_eq!(all_frames[0].channel(), 7);
        assert_eq!(&all_frames[0].payload[..], b"hi");
    }
}
