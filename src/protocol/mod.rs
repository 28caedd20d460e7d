//! Protocol module - versions, wire format, framing, and frame types.
//!
//! This module implements the 0-8 / 0-9-1 framing around method bodies:
//! - 7-byte frame header and frame-end octet
//! - Protocol header greeting
//! - Frame buffer for accumulating partial reads
//! - Frame struct with typed accessors

mod frame;
mod frame_buffer;
mod version;
mod wire_format;

pub use frame::{build_frame, Frame};
pub use frame_buffer::FrameBuffer;
pub use version::ProtocolVersion;
pub use wire_format::{
    FrameHeader, FrameType, ProtocolHeader, FRAME_END, FRAME_OVERHEAD, HEADER_SIZE,
    PROTOCOL_HEADER_SIZE,
};
