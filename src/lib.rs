//! # amqp-wire
//!
//! Wire codec for the AMQP family.
//!
//! - **0-8 / 0-9-1**: method bodies described by per-version schema tables,
//!   a `(class_id, method_id)` registry, per-version dispatcher traits and
//!   the frame layer around them.
//! - **1.0**: the self-describing value encoding, described types and a
//!   descriptor registry that accepts both symbolic and numeric
//!   descriptors.
//!
//! The crate does no I/O. Callers feed bytes in and get typed values out.
//!
//! ## Example
//!
//! ```
//! use amqp_wire::method::{v0_8, MethodBody, MethodTable};
//!
//! let body = MethodBody::builder(v0_8::Method::FilePublish)
//!     .set_str("exchange", "amq.direct")
//!     .set_str("routing_key", "test")
//!     .set("mandatory", true)
//!     .set_str("identifier", "id1")
//!     .build()
//!     .unwrap();
//!
//! let payload = body.encode_payload();
//! let decoded = v0_8::Method::registry().decode_payload(payload).unwrap();
//! assert_eq!(decoded, body);
//! ```

pub mod amqp1;
pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod method;
pub mod protocol;

pub use config::{CodecConfig, DescriptorMode};
pub use error::{Result, WireError};
pub use protocol::ProtocolVersion;
