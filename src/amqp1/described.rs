//! Described domain types.

use super::fields::ListFields;
use super::security::{SaslChallenge, SaslInit, SaslMechanisms, SaslOutcome, SaslResponse};
use super::transport::{Begin, Close, End, Error, Open};
use super::types::{Descriptor, Value};
use crate::error::{Result, WireError};

/// A 1.0 type encoded as a described list.
///
/// Implementors supply the descriptors and the positional field mapping;
/// list handling, descriptor checks and encoding come with the trait.
pub trait DescribedType: Sized + Send + Sync + 'static {
    /// Short type name, e.g. `sasl-init`.
    const NAME: &'static str;
    /// Symbolic descriptor, e.g. `amqp:sasl-init:list`.
    const SYMBOLIC: &'static str;
    /// Numeric descriptor.
    const CODE: u64;

    /// Build from the list items, in schema order.
    fn construct(fields: &mut ListFields<'_>) -> Result<Self>;

    /// Field values in schema order, `null` for unset.
    fn to_fields(&self) -> Vec<Value>;

    /// Both descriptor forms.
    fn descriptors() -> [Descriptor; 2] {
        [Descriptor::symbol(Self::SYMBOLIC), Descriptor::Code(Self::CODE)]
    }

    /// Check whether a descriptor names this type.
    fn matches(descriptor: &Descriptor) -> bool {
        match descriptor {
            Descriptor::Symbol(s) => s.as_str() == Self::SYMBOLIC,
            Descriptor::Code(c) => *c == Self::CODE,
        }
    }

    /// Build from the value a descriptor wraps.
    ///
    /// # Errors
    ///
    /// `UnexpectedEncoding` if the value is not a list, or a field has the
    /// wrong type.
    fn from_list(value: &Value) -> Result<Self> {
        match value {
            Value::List(items) => Self::construct(&mut ListFields::new(Self::NAME, items)),
            other => Err(WireError::UnexpectedEncoding(format!(
                "{} requires a list, found {}",
                Self::NAME,
                other.type_name()
            ))),
        }
    }

    /// Build from a complete described value carrying one of this type's
    /// descriptors.
    fn from_described(value: &Value) -> Result<Self> {
        match value {
            Value::Described(d) if Self::matches(&d.descriptor) => Self::from_list(&d.value),
            Value::Described(d) => Err(WireError::UnexpectedEncoding(format!(
                "expected {}, found descriptor {}",
                Self::NAME,
                d.descriptor
            ))),
            other => Err(WireError::UnexpectedEncoding(format!(
                "expected described {}, found {}",
                Self::NAME,
                other.type_name()
            ))),
        }
    }

    /// Encode as a described list under the numeric descriptor, trailing
    /// unset fields trimmed.
    fn to_value(&self) -> Value {
        let mut fields = self.to_fields();
        while fields.last().map_or(false, Value::is_null) {
            fields.pop();
        }
        Value::described(Descriptor::Code(Self::CODE), Value::List(fields))
    }
}

/// Any standard described type this crate knows how to construct.
#[derive(Debug, Clone, PartialEq)]
pub enum DescribedObject {
    /// `sasl-mechanisms`
    SaslMechanisms(SaslMechanisms),
    /// `sasl-init`
    SaslInit(SaslInit),
    /// `sasl-challenge`
    SaslChallenge(SaslChallenge),
    /// `sasl-response`
    SaslResponse(SaslResponse),
    /// `sasl-outcome`
    SaslOutcome(SaslOutcome),
    /// `open`
    Open(Open),
    /// `begin`
    Begin(Begin),
    /// `end`
    End(End),
    /// `close`
    Close(Close),
    /// `error`
    Error(Error),
}

macro_rules! described_object {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for DescribedObject {
                fn from(v: $variant) -> Self {
                    DescribedObject::$variant(v)
                }
            }
        )*

        impl DescribedObject {
            /// Short type name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(DescribedObject::$variant(_) => <$variant as DescribedType>::NAME,)*
                }
            }

            /// Encode as a described value.
            pub fn to_value(&self) -> Value {
                match self {
                    $(DescribedObject::$variant(v) => v.to_value(),)*
                }
            }
        }
    };
}

described_object!(
    SaslMechanisms,
    SaslInit,
    SaslChallenge,
    SaslResponse,
    SaslOutcome,
    Open,
    Begin,
    End,
    Close,
    Error,
);
