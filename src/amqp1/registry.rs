//! Descriptor registry for described-type construction.
//!
//! Registrations go through a [`RegistryBuilder`]; [`RegistryBuilder::build`]
//! freezes the table into a [`DescriptorRegistry`] that is cheap to clone and
//! safe to share across threads.
//!
//! # Example
//!
//! ```
//! use amqp_wire::amqp1::{encoder, DescribedObject, DescribedType, DescriptorRegistry};
//! use amqp_wire::amqp1::transport::Close;
//! use amqp_wire::codec::WireReader;
//!
//! let registry = DescriptorRegistry::standard().unwrap();
//! let bytes = encoder::encode(&Close::default().to_value()).unwrap();
//!
//! let mut reader = WireReader::new(bytes);
//! let object = registry.decode(&mut reader).unwrap();
//! assert_eq!(object, DescribedObject::Close(Close::default()));
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::decoder;
use super::described::{DescribedObject, DescribedType};
use super::types::{Descriptor, Value};
use crate::codec::WireReader;
use crate::config::DescriptorMode;
use crate::error::{Result, WireError};

/// Builds a `T` from the value a descriptor wraps.
pub struct Constructor<T> {
    /// Name of the type produced, for diagnostics.
    pub type_name: &'static str,
    /// Rust type the constructor reads. Two registrations agree only when
    /// this matches; names alone may collide.
    pub source: TypeId,
    /// Construction function.
    pub construct: fn(&Value) -> Result<T>,
}

impl<T> Constructor<T> {
    /// Constructor reading a `D` and converting it into `T`.
    pub fn of<D>() -> Self
    where
        D: DescribedType,
        T: From<D>,
    {
        Self {
            type_name: D::NAME,
            source: TypeId::of::<D>(),
            construct: construct_as::<D, T>,
        }
    }
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Constructor<T> {}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("type_name", &self.type_name)
            .finish()
    }
}

fn construct_as<D, T>(value: &Value) -> Result<T>
where
    D: DescribedType,
    T: From<D>,
{
    D::from_list(value).map(T::from)
}

/// Collects descriptor registrations before freezing them.
pub struct RegistryBuilder<T> {
    table: HashMap<Descriptor, Constructor<T>>,
}

impl<T> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RegistryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("descriptors", &self.table.len())
            .finish()
    }
}

impl<T> RegistryBuilder<T> {
    /// Empty builder.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Bind one descriptor to a constructor.
    ///
    /// Binding a descriptor again to the same type is a no-op.
    ///
    /// # Errors
    ///
    /// `DescriptorConflict` if the descriptor already maps to another type.
    pub fn register(&mut self, descriptor: Descriptor, constructor: Constructor<T>) -> Result<()> {
        if let Some(existing) = self.table.get(&descriptor) {
            if existing.source == constructor.source {
                trace!(%descriptor, type_name = constructor.type_name, "Descriptor already registered");
                return Ok(());
            }
            return Err(WireError::DescriptorConflict {
                descriptor,
                existing: existing.type_name,
                replacement: constructor.type_name,
            });
        }

        trace!(%descriptor, type_name = constructor.type_name, "Registered descriptor");
        self.table.insert(descriptor, constructor);
        Ok(())
    }

    /// Register both descriptors of `D`.
    pub fn register_type<D>(&mut self) -> Result<()>
    where
        D: DescribedType,
        T: From<D>,
    {
        let constructor = Constructor::of::<D>();
        for descriptor in D::descriptors() {
            self.register(descriptor, constructor)?;
        }
        Ok(())
    }

    /// Freeze the registrations.
    pub fn build(self) -> DescriptorRegistry<T> {
        debug!(descriptors = self.table.len(), "Descriptor registry built");
        DescriptorRegistry {
            table: Arc::new(self.table),
        }
    }
}

/// Immutable descriptor table.
///
/// Clones share one table.
pub struct DescriptorRegistry<T> {
    table: Arc<HashMap<Descriptor, Constructor<T>>>,
}

impl<T> Clone for DescriptorRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T> fmt::Debug for DescriptorRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorRegistry")
            .field("descriptors", &self.table.len())
            .finish()
    }
}

impl<T> DescriptorRegistry<T> {
    /// Constructor for a descriptor.
    pub fn lookup(&self, descriptor: &Descriptor) -> Option<&Constructor<T>> {
        self.table.get(descriptor)
    }

    /// Check whether a descriptor is registered.
    pub fn contains(&self, descriptor: &Descriptor) -> bool {
        self.table.contains_key(descriptor)
    }

    /// Number of registered descriptors (each type usually has two).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Construct from a descriptor and the value it wraps.
    ///
    /// # Errors
    ///
    /// `UnknownDescriptor` if nothing is registered, otherwise whatever the
    /// constructor reports.
    pub fn construct(&self, descriptor: &Descriptor, value: &Value) -> Result<T> {
        match self.table.get(descriptor) {
            Some(constructor) => (constructor.construct)(value),
            None => Err(WireError::UnknownDescriptor(descriptor.clone())),
        }
    }

    /// Construct from an already decoded described value.
    pub fn construct_value(&self, value: &Value) -> Result<T> {
        match value {
            Value::Described(d) => self.construct(&d.descriptor, &d.value),
            other => Err(WireError::UnexpectedEncoding(format!(
                "expected described value, found {}",
                other.type_name()
            ))),
        }
    }

    /// Decode one described value and construct it.
    ///
    /// Wire errors roll the reader back. Once the value is read it stays
    /// consumed, so an unknown descriptor or a shape error leaves the reader
    /// at the next sibling.
    pub fn decode(&self, reader: &mut WireReader) -> Result<T> {
        let value = decoder::read_value(reader)?;
        self.construct_value(&value)
    }

    /// Like [`decode`](Self::decode), but an unknown descriptor yields
    /// `Ok(None)`.
    pub fn decode_or_skip(&self, reader: &mut WireReader) -> Result<Option<T>> {
        match self.decode(reader) {
            Ok(object) => Ok(Some(object)),
            Err(WireError::UnknownDescriptor(descriptor)) => {
                debug!(%descriptor, "Skipping unknown described type");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Decode honouring a descriptor mode.
    pub fn decode_with(&self, reader: &mut WireReader, mode: DescriptorMode) -> Result<Option<T>> {
        match mode {
            DescriptorMode::Strict => self.decode(reader).map(Some),
            DescriptorMode::Lenient => self.decode_or_skip(reader),
        }
    }
}

impl DescriptorRegistry<DescribedObject> {
    /// Registry holding every SASL and transport type.
    pub fn standard() -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        super::security::register(&mut builder)?;
        super::transport::register(&mut builder)?;
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amqp1::security::{SaslInit, SaslMechanisms};
    use crate::amqp1::fields::ListFields;
    use crate::amqp1::transport::{Close, End, Open};
    use crate::amqp1::{encoder, Symbol};

    fn encoded(value: &Value) -> WireReader {
        WireReader::new(encoder::encode(value).unwrap())
    }

    #[test]
    fn test_standard_registers_both_forms() {
        let registry = DescriptorRegistry::standard().unwrap();
        assert_eq!(registry.len(), 20);
        assert!(registry.contains(&Descriptor::Code(0x40)));
        assert!(registry.contains(&Descriptor::symbol("amqp:sasl-mechanisms:list")));
        assert_eq!(
            registry.lookup(&Descriptor::Code(0x1d)).map(|c| c.type_name),
            Some("error")
        );
    }

    #[test]
    fn test_symbol_and_code_decode_identically() {
        let registry = DescriptorRegistry::standard().unwrap();
        let list = Value::List(vec![Value::Symbol(Symbol::new("PLAIN"))]);
        let by_code = Value::described(Descriptor::Code(0x41), list.clone());
        let by_symbol = Value::described(Descriptor::symbol("amqp:sasl-init:list"), list);

        let a = registry.decode(&mut encoded(&by_code)).unwrap();
        let b = registry.decode(&mut encoded(&by_symbol)).unwrap();
        assert_eq!(a, b);
        assert!(matches!(a, DescribedObject::SaslInit(_)));
    }

    #[test]
    fn test_reregistering_same_type_is_noop() {
        let mut builder = RegistryBuilder::<DescribedObject>::new();
        builder.register_type::<Close>().unwrap();
        builder.register_type::<Close>().unwrap();
        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn test_conflicting_registration() {
        let mut builder = RegistryBuilder::<DescribedObject>::new();
        builder.register_type::<Close>().unwrap();
        let err = builder
            .register(Descriptor::Code(0x18), Constructor::of::<End>())
            .unwrap_err();
        assert!(matches!(
            err,
            WireError::DescriptorConflict { existing: "close", replacement: "end", .. }
        ));
    }

    #[test]
    fn test_same_name_different_type_conflicts() {
        #[derive(Debug)]
        struct Shadow;

        impl DescribedType for Shadow {
            const NAME: &'static str = "close";
            const SYMBOLIC: &'static str = "amqp:close:list";
            const CODE: u64 = 0x18;

            fn construct(_fields: &mut ListFields<'_>) -> Result<Self> {
                Ok(Shadow)
            }

            fn to_fields(&self) -> Vec<Value> {
                Vec::new()
            }
        }

        #[derive(Debug, PartialEq)]
        enum Seen {
            Close,
            Shadow,
        }

        impl From<Close> for Seen {
            fn from(_: Close) -> Self {
                Seen::Close
            }
        }

        impl From<Shadow> for Seen {
            fn from(_: Shadow) -> Self {
                Seen::Shadow
            }
        }

        let mut builder = RegistryBuilder::<Seen>::new();
        builder.register_type::<Close>().unwrap();
        let err = builder.register_type::<Shadow>().unwrap_err();
        assert!(matches!(
            err,
            WireError::DescriptorConflict { existing: "close", replacement: "close", .. }
        ));

        let registry = builder.build();
        let value = Close::default().to_value();
        assert_eq!(registry.decode(&mut encoded(&value)).unwrap(), Seen::Close);
    }

    #[test]
    fn test_unknown_descriptor_consumes_value() {
        let registry = DescriptorRegistry::standard().unwrap();
        let unknown = Value::described(Descriptor::Code(0x77), Value::List(vec![Value::Uint(1)]));
        let mut bytes = encoder::encode(&unknown).unwrap().to_vec();
        bytes.extend_from_slice(&encoder::encode(&Close::default().to_value()).unwrap());
        let mut reader = WireReader::from_slice(&bytes);

        let err = registry.decode(&mut reader).unwrap_err();
        assert!(matches!(err, WireError::UnknownDescriptor(Descriptor::Code(0x77))));
        assert_eq!(
            registry.decode(&mut reader).unwrap(),
            DescribedObject::Close(Close::default())
        );
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_decode_with_modes() {
        let registry = DescriptorRegistry::standard().unwrap();
        let unknown = Value::described(Descriptor::symbol("vendor:thing"), Value::List(vec![]));

        let skipped = registry
            .decode_with(&mut encoded(&unknown), DescriptorMode::Lenient)
            .unwrap();
        assert!(skipped.is_none());

        let err = registry
            .decode_with(&mut encoded(&unknown), DescriptorMode::Strict)
            .unwrap_err();
        assert!(matches!(err, WireError::UnknownDescriptor(_)));
    }

    #[test]
    fn test_non_list_body_is_unexpected_encoding() {
        let registry = DescriptorRegistry::standard().unwrap();
        let value = Value::described(Descriptor::Code(0x40), Value::Uint(3));
        let err = registry.decode(&mut encoded(&value)).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEncoding(_)));
    }

    #[test]
    fn test_truncated_input_rolls_back() {
        let registry = DescriptorRegistry::standard().unwrap();
        let mechanisms = SaslMechanisms {
            sasl_server_mechanisms: Some(vec![Symbol::new("PLAIN"), Symbol::new("ANONYMOUS")]),
        };
        let open = Open {
            container_id: Some("broker".to_string()),
            hostname: Some("vhost".to_string()),
            max_frame_size: Some(4096),
            offered_capabilities: Some(vec![Symbol::new("ANONYMOUS-RELAY")]),
            properties: Some(vec![(
                Value::Symbol(Symbol::new("product")),
                Value::String("amqp-wire".to_string()),
            )]),
            ..Open::default()
        };

        for value in [mechanisms.to_value(), open.to_value()] {
            let bytes = encoder::encode(&value).unwrap();
            for cut in 0..bytes.len() {
                let mut reader = WireReader::new(bytes.slice(..cut));
                let err = registry.decode(&mut reader).unwrap_err();
                assert!(
                    matches!(err, WireError::TruncatedInput { .. } | WireError::Encoding(_)),
                    "cut at {}: {}",
                    cut,
                    err
                );
                assert_eq!(reader.position(), 0, "cut at {}", cut);
            }
            assert!(registry.decode(&mut WireReader::new(bytes)).is_ok());
        }
    }

    #[test]
    fn test_custom_target_type() {
        #[derive(Debug, PartialEq)]
        struct Mechanism(Option<Symbol>);

        impl From<SaslInit> for Mechanism {
            fn from(init: SaslInit) -> Self {
                Mechanism(init.mechanism)
            }
        }

        let mut builder = RegistryBuilder::<Mechanism>::new();
        builder.register_type::<SaslInit>().unwrap();
        let registry = builder.build();

        let value = SaslInit {
            mechanism: Some(Symbol::new("EXTERNAL")),
            ..SaslInit::default()
        }
        .to_value();
        assert_eq!(
            registry.decode(&mut encoded(&value)).unwrap(),
            Mechanism(Some(Symbol::new("EXTERNAL")))
        );
    }
}
