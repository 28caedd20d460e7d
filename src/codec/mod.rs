//! Primitive codec - wire primitives shared by every protocol version.
//!
//! This module provides the leaf layer of the stack:
//!
//! - [`WireReader`] - bounds-checked cursor over a frame payload
//! - [`writer`] - symmetric `write_*` helpers appending to a `BufMut`
//! - [`ShortString`] - length-limited (255 byte) UTF-8 text
//!
//! # Design
//!
//! All multi-byte integers are Big Endian. Readers fail with
//! [`WireError::TruncatedInput`](crate::WireError::TruncatedInput) instead of
//! padding or panicking; writers never fail because every value they accept
//! was validated on construction.
//!
//! # Example
//!
//! ```
//! use amqp_wire::codec::{writer, ShortString, WireReader};
//! use bytes::BytesMut;
//!
//! let mut out = BytesMut::new();
//! writer::write_u16(&mut out, 70);
//! writer::write_short_string(&mut out, &ShortString::new("amq.direct").unwrap());
//!
//! let mut reader = WireReader::new(out.freeze());
//! assert_eq!(reader.read_u16().unwrap(), 70);
//! assert_eq!(reader.read_short_string().unwrap().as_str(), "amq.direct");
//! ```

mod reader;
mod short_string;
pub mod writer;

pub use reader::{Mark, WireReader};
pub use short_string::{ShortString, SHORT_STRING_MAX_LEN};
