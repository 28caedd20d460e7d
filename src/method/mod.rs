//! Method bodies for the 0-8 and 0-9-1 class/method framing.
//!
//! A version is a `Method` enum generated from a schema table; a single
//! generic [`MethodBody`] carries the field values of any method, and each
//! version's [`MethodRegistry`] decodes bodies by `(class_id, method_id)`.
//!
//! # Example
//!
//! ```
//! use amqp_wire::method::{v0_9_1, MethodTable};
//!
//! let body = amqp_wire::method::MethodBody::builder(v0_9_1::Method::QueueDeclare)
//!     .set_str("queue", "orders")
//!     .set("durable", true)
//!     .build()
//!     .unwrap();
//!
//! let payload = body.encode_payload();
//! let decoded = v0_9_1::Method::registry().decode_payload(payload).unwrap();
//! assert_eq!(decoded, body);
//! ```

#[macro_use]
mod macros;

mod body;
mod registry;
mod schema;
mod value;

pub mod v0_8;
pub mod v0_9_1;

pub use body::{MethodBody, MethodBodyBuilder, METHOD_PREFIX_SIZE};
pub use registry::MethodRegistry;
pub use schema::{FieldKind, FieldSpec, MethodSpec, MethodTable};
pub use value::{FieldTable, FieldValue};

use thiserror::Error;

/// Version-agnostic dispatch seam.
///
/// Implemented for `MethodBody<v0_8::Method>` over any
/// `v0_8::MethodDispatcher` (and likewise for 0-9-1), so generic code such
/// as the frame router can route bodies without knowing the version.
pub trait Dispatch<D: ?Sized> {
    /// Error produced by the invoked handler.
    type Error;

    /// Invoke the handler operation matching this body.
    fn dispatch(&self, dispatcher: &mut D, channel_id: u16) -> Result<(), Self::Error>;
}

/// Returned by dispatcher operations a role does not override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no handler for {method} on channel {channel_id}")]
pub struct UnhandledMethod {
    /// Dotted method name.
    pub method: &'static str,
    /// Channel the frame arrived on.
    pub channel_id: u16,
}
