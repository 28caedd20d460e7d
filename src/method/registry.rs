//! Method registry for decoding bodies by `(class_id, method_id)`.
//!
//! Each protocol version owns one registry, built from its method table on
//! first use and read-only afterwards.
//!
//! # Example
//!
//! ```
//! use amqp_wire::codec::WireReader;
//! use amqp_wire::method::{v0_9_1, MethodTable};
//!
//! let registry = v0_9_1::Method::registry();
//! assert_eq!(registry.lookup(60, 40), Some(v0_9_1::Method::BasicPublish));
//!
//! // basic.qos-ok has no fields
//! let mut reader = WireReader::from_slice(&[]);
//! let body = registry.decode(60, 11, &mut reader, 0).unwrap();
//! assert_eq!(body.name(), "basic.qos-ok");
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use super::body::{MethodBody, METHOD_PREFIX_SIZE};
use super::schema::MethodTable;
use crate::codec::WireReader;
use crate::error::{Result, WireError};

/// Registry mapping `(class_id, method_id)` to one version's method tags.
#[derive(Debug)]
pub struct MethodRegistry<M: MethodTable> {
    /// Methods by wire identifier.
    by_id: HashMap<(u16, u16), M>,
    /// Methods by dotted name.
    by_name: HashMap<&'static str, M>,
}

impl<M: MethodTable> MethodRegistry<M> {
    /// Build the registry from the version's method table.
    pub fn new() -> Self {
        let all = M::all();
        let mut by_id = HashMap::with_capacity(all.len());
        let mut by_name = HashMap::with_capacity(all.len());

        for &method in all {
            let spec = method.spec();
            let previous = by_id.insert((spec.class_id, spec.method_id), method);
            debug_assert!(
                previous.is_none(),
                "duplicate method id ({}, {}) in {}",
                spec.class_id,
                spec.method_id,
                M::VERSION
            );
            by_name.insert(spec.name, method);
        }

        Self { by_id, by_name }
    }

    /// Get a method by wire identifier.
    pub fn lookup(&self, class_id: u16, method_id: u16) -> Option<M> {
        self.by_id.get(&(class_id, method_id)).copied()
    }

    /// Get a method by dotted name.
    pub fn by_name(&self, name: &str) -> Option<M> {
        self.by_name.get(name).copied()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Decode a body whose class and method ids have already been read.
    ///
    /// Consumes exactly `declared_size` bytes on success. On any failure the
    /// reader is rolled back to where it started.
    ///
    /// # Errors
    ///
    /// - `UnknownMethod` if the pair is not part of this version.
    /// - `TruncatedInput` / `Encoding` from field decoding.
    /// - `MalformedFrame` if bytes remain inside `declared_size` once every
    ///   declared field has been read.
    pub fn decode(
        &self,
        class_id: u16,
        method_id: u16,
        reader: &mut WireReader,
        declared_size: usize,
    ) -> Result<MethodBody<M>> {
        let method = self
            .lookup(class_id, method_id)
            .ok_or(WireError::UnknownMethod {
                class_id,
                method_id,
            })?;

        let mark = reader.mark();
        let outer_limit = reader.push_limit(declared_size);
        let start = reader.position();

        let body = match MethodBody::decode_fields(method, reader) {
            Ok(body) => body,
            Err(e) => {
                reader.reset(mark);
                return Err(e);
            }
        };

        let leftover = reader.declared_remaining();
        if leftover != 0 {
            let consumed = reader.position() - start;
            reader.reset(mark);
            return Err(WireError::MalformedFrame(format!(
                "{} consumed {} of {} declared bytes ({} left over)",
                body.name(),
                consumed,
                declared_size,
                leftover
            )));
        }

        reader.restore_limit(outer_limit);
        Ok(body)
    }

    /// Decode a full method frame payload: `[class_id][method_id][fields]`.
    pub fn decode_payload(&self, payload: Bytes) -> Result<MethodBody<M>> {
        let size = payload.len();
        let mut reader = WireReader::new(payload);
        let class_id = reader.read_u16()?;
        let method_id = reader.read_u16()?;
        self.decode(class_id, method_id, &mut reader, size - METHOD_PREFIX_SIZE)
    }
}

impl<M: MethodTable> Default for MethodRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}
