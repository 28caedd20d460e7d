//! Error types for amqp-wire.

use thiserror::Error;

use crate::amqp1::Descriptor;

/// Main error type for all codec operations.
#[derive(Debug, Error)]
pub enum WireError {
    /// Fewer bytes available than a primitive read requires.
    #[error("Truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// Bytes are present but do not form a legal value (bad length byte,
    /// invalid UTF-8, oversized short string, unknown format code).
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Declared and consumed sizes disagree, or the frame envelope is broken.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// No method registered for the pair in the active protocol version.
    #[error("Unknown method: class {class_id}, method {method_id}")]
    UnknownMethod {
        /// Class identifier from the wire.
        class_id: u16,
        /// Method identifier from the wire.
        method_id: u16,
    },

    /// No constructor registered for a 1.0 descriptor.
    ///
    /// Recoverable: the described value has already been consumed, so the
    /// caller may skip it and carry on.
    #[error("Unknown descriptor: {0}")]
    UnknownDescriptor(Descriptor),

    /// A generic 1.0 value has the wrong shape for the requested type.
    #[error("Unexpected encoding: {0}")]
    UnexpectedEncoding(String),

    /// A method body was built with a value of the wrong kind.
    #[error("Field mismatch: {method}.{field} expects {expected}")]
    FieldMismatch {
        /// Method name, e.g. `file.publish`.
        method: &'static str,
        /// Field name.
        field: String,
        /// Expected field kind.
        expected: &'static str,
    },

    /// A descriptor is already bound to a different constructor.
    #[error("Descriptor {descriptor} already registered to {existing}, refusing {replacement}")]
    DescriptorConflict {
        /// The contested descriptor.
        descriptor: Descriptor,
        /// Type currently registered.
        existing: &'static str,
        /// Type that attempted to register.
        replacement: &'static str,
    },

    /// Frame size exceeds the configured maximum.
    #[error("Frame size {size} exceeds maximum {max}")]
    FrameTooLarge {
        /// Declared frame size.
        size: u32,
        /// Configured limit.
        max: u32,
    },

    /// Configuration failed validation or parsing.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WireError {
    /// Shorthand for [`WireError::TruncatedInput`].
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        Self::TruncatedInput { needed, available }
    }
}

/// Result type alias using WireError.
pub type Result<T> = std::result::Result<T, WireError>;
