//! SASL frame bodies.
//!
//! These carry mechanism names and challenge/response bytes only; no
//! mechanism is implemented here.

use std::fmt;

use bytes::Bytes;

use super::described::{DescribedObject, DescribedType};
use super::fields::{field, multiple_field, FromValue, IntoValue, ListFields};
use super::registry::RegistryBuilder;
use super::types::{Symbol, Value};
use crate::error::Result;

/// Register every SASL type with a builder.
pub fn register(builder: &mut RegistryBuilder<DescribedObject>) -> Result<()> {
    builder.register_type::<SaslMechanisms>()?;
    builder.register_type::<SaslInit>()?;
    builder.register_type::<SaslChallenge>()?;
    builder.register_type::<SaslResponse>()?;
    builder.register_type::<SaslOutcome>()?;
    Ok(())
}

/// Mechanisms the server offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslMechanisms {
    /// Offered mechanism names.
    pub sasl_server_mechanisms: Option<Vec<Symbol>>,
}

impl DescribedType for SaslMechanisms {
    const NAME: &'static str = "sasl-mechanisms";
    const SYMBOLIC: &'static str = "amqp:sasl-mechanisms:list";
    const CODE: u64 = 0x40;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            sasl_server_mechanisms: fields.multiple("sasl_server_mechanisms"),
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![multiple_field(&self.sasl_server_mechanisms)]
    }
}

/// Mechanism chosen by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslInit {
    /// Selected mechanism.
    pub mechanism: Option<Symbol>,
    /// First response, mechanism specific.
    pub initial_response: Option<Bytes>,
    /// Host the client wants to reach.
    pub hostname: Option<String>,
}

impl DescribedType for SaslInit {
    const NAME: &'static str = "sasl-init";
    const SYMBOLIC: &'static str = "amqp:sasl-init:list";
    const CODE: u64 = 0x41;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            mechanism: fields.scalar("mechanism")?,
            initial_response: fields.scalar("initial_response")?,
            hostname: fields.scalar("hostname")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![
            field(&self.mechanism),
            field(&self.initial_response),
            field(&self.hostname),
        ]
    }
}

/// Server challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslChallenge {
    /// Challenge bytes.
    pub challenge: Option<Bytes>,
}

impl DescribedType for SaslChallenge {
    const NAME: &'static str = "sasl-challenge";
    const SYMBOLIC: &'static str = "amqp:sasl-challenge:list";
    const CODE: u64 = 0x42;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            challenge: fields.scalar("challenge")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![field(&self.challenge)]
    }
}

/// Client response to a challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslResponse {
    /// Response bytes.
    pub response: Option<Bytes>,
}

impl DescribedType for SaslResponse {
    const NAME: &'static str = "sasl-response";
    const SYMBOLIC: &'static str = "amqp:sasl-response:list";
    const CODE: u64 = 0x43;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            response: fields.scalar("response")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![field(&self.response)]
    }
}

/// Result of the exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaslOutcome {
    /// Outcome code.
    pub code: Option<SaslCode>,
    /// Final mechanism data.
    pub additional_data: Option<Bytes>,
}

impl DescribedType for SaslOutcome {
    const NAME: &'static str = "sasl-outcome";
    const SYMBOLIC: &'static str = "amqp:sasl-outcome:list";
    const CODE: u64 = 0x44;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            code: fields.scalar("code")?,
            additional_data: fields.scalar("additional_data")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![field(&self.code), field(&self.additional_data)]
    }
}

/// SASL outcome code, a restricted `ubyte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SaslCode {
    /// Authentication succeeded.
    Ok = 0,
    /// Bad credentials.
    Auth = 1,
    /// Unspecified system error.
    Sys = 2,
    /// Permanent system error.
    SysPerm = 3,
    /// Transient system error.
    SysTemp = 4,
}

impl SaslCode {
    /// Parse the wire value.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SaslCode::Ok),
            1 => Some(SaslCode::Auth),
            2 => Some(SaslCode::Sys),
            3 => Some(SaslCode::SysPerm),
            4 => Some(SaslCode::SysTemp),
            _ => None,
        }
    }
}

impl fmt::Display for SaslCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaslCode::Ok => "ok",
            SaslCode::Auth => "auth",
            SaslCode::Sys => "sys",
            SaslCode::SysPerm => "sys-perm",
            SaslCode::SysTemp => "sys-temp",
        };
        f.write_str(name)
    }
}

impl FromValue for SaslCode {
    const EXPECTED: &'static str = "sasl-code";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ubyte(v) => SaslCode::from_u8(*v),
            _ => None,
        }
    }
}

impl IntoValue for SaslCode {
    fn into_value(self) -> Value {
        Value::Ubyte(self as u8)
    }
}
