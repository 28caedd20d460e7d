//! Connection and session performatives, plus the error they carry.

use super::described::{DescribedObject, DescribedType};
use super::fields::{field, multiple_field, ListFields};
use super::registry::RegistryBuilder;
use super::types::{Symbol, Value};
use crate::error::Result;

/// Register every transport type with a builder.
pub fn register(builder: &mut RegistryBuilder<DescribedObject>) -> Result<()> {
    builder.register_type::<Open>()?;
    builder.register_type::<Begin>()?;
    builder.register_type::<End>()?;
    builder.register_type::<Close>()?;
    builder.register_type::<Error>()?;
    Ok(())
}

/// Connection negotiation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Open {
    /// Identifies the sending container. Required on the wire.
    pub container_id: Option<String>,
    /// Virtual host the sender wants to reach.
    pub hostname: Option<String>,
    /// Largest frame the sender accepts, in bytes.
    pub max_frame_size: Option<u32>,
    /// Highest channel number the sender may use.
    pub channel_max: Option<u16>,
    /// Idle timeout in milliseconds.
    pub idle_time_out: Option<u32>,
    /// Locales the sender may write in, most preferred first.
    pub outgoing_locales: Option<Vec<Symbol>>,
    /// Locales the sender wants to read, most preferred first.
    pub incoming_locales: Option<Vec<Symbol>>,
    /// Extensions the sender supports.
    pub offered_capabilities: Option<Vec<Symbol>>,
    /// Extensions the sender can use if the peer supports them.
    pub desired_capabilities: Option<Vec<Symbol>>,
    /// Connection properties as symbol-keyed map entries.
    pub properties: Option<Vec<(Value, Value)>>,
}

impl DescribedType for Open {
    const NAME: &'static str = "open";
    const SYMBOLIC: &'static str = "amqp:open:list";
    const CODE: u64 = 0x10;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            container_id: fields.scalar("container_id")?,
            hostname: fields.scalar("hostname")?,
            max_frame_size: fields.scalar("max_frame_size")?,
            channel_max: fields.scalar("channel_max")?,
            idle_time_out: fields.scalar("idle_time_out")?,
            outgoing_locales: fields.multiple("outgoing_locales"),
            incoming_locales: fields.multiple("incoming_locales"),
            offered_capabilities: fields.multiple("offered_capabilities"),
            desired_capabilities: fields.multiple("desired_capabilities"),
            properties: fields.scalar("properties")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![
            field(&self.container_id),
            field(&self.hostname),
            field(&self.max_frame_size),
            field(&self.channel_max),
            field(&self.idle_time_out),
            multiple_field(&self.outgoing_locales),
            multiple_field(&self.incoming_locales),
            multiple_field(&self.offered_capabilities),
            multiple_field(&self.desired_capabilities),
            field(&self.properties),
        ]
    }
}

/// Session start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Begin {
    /// Channel of the peer's `begin`, set when answering one.
    pub remote_channel: Option<u16>,
    /// Transfer id the sender assigns next.
    pub next_outgoing_id: Option<u32>,
    /// Transfers the sender will accept.
    pub incoming_window: Option<u32>,
    /// Transfers the sender may send.
    pub outgoing_window: Option<u32>,
    /// Highest link handle the sender may use.
    pub handle_max: Option<u32>,
    /// Extensions the sender supports.
    pub offered_capabilities: Option<Vec<Symbol>>,
    /// Extensions the sender can use if the peer supports them.
    pub desired_capabilities: Option<Vec<Symbol>>,
    /// Session properties.
    pub properties: Option<Vec<(Value, Value)>>,
}

impl DescribedType for Begin {
    const NAME: &'static str = "begin";
    const SYMBOLIC: &'static str = "amqp:begin:list";
    const CODE: u64 = 0x11;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            remote_channel: fields.scalar("remote_channel")?,
            next_outgoing_id: fields.scalar("next_outgoing_id")?,
            incoming_window: fields.scalar("incoming_window")?,
            outgoing_window: fields.scalar("outgoing_window")?,
            handle_max: fields.scalar("handle_max")?,
            offered_capabilities: fields.multiple("offered_capabilities"),
            desired_capabilities: fields.multiple("desired_capabilities"),
            properties: fields.scalar("properties")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![
            field(&self.remote_channel),
            field(&self.next_outgoing_id),
            field(&self.incoming_window),
            field(&self.outgoing_window),
            field(&self.handle_max),
            multiple_field(&self.offered_capabilities),
            multiple_field(&self.desired_capabilities),
            field(&self.properties),
        ]
    }
}

/// Session end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct End {
    /// Why the session ended, if it failed.
    pub error: Option<Error>,
}

impl DescribedType for End {
    const NAME: &'static str = "end";
    const SYMBOLIC: &'static str = "amqp:end:list";
    const CODE: u64 = 0x17;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            error: fields.described("error")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![self.error.as_ref().map_or(Value::Null, Error::to_value)]
    }
}

/// Connection close.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Close {
    /// Why the connection closed, if it failed.
    pub error: Option<Error>,
}

impl DescribedType for Close {
    const NAME: &'static str = "close";
    const SYMBOLIC: &'static str = "amqp:close:list";
    const CODE: u64 = 0x18;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            error: fields.described("error")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![self.error.as_ref().map_or(Value::Null, Error::to_value)]
    }
}

/// Error details attached to `end` and `close`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Error {
    /// Error condition, e.g. `amqp:internal-error`.
    pub condition: Option<Symbol>,
    /// Human-readable text.
    pub description: Option<String>,
    /// Extra map-encoded details.
    pub info: Option<Vec<(Value, Value)>>,
}

impl DescribedType for Error {
    const NAME: &'static str = "error";
    const SYMBOLIC: &'static str = "amqp:error:list";
    const CODE: u64 = 0x1d;

    fn construct(fields: &mut ListFields<'_>) -> Result<Self> {
        Ok(Self {
            condition: fields.scalar("condition")?,
            description: fields.scalar("description")?,
            info: fields.scalar("info")?,
        })
    }

    fn to_fields(&self) -> Vec<Value> {
        vec![
            field(&self.condition),
            field(&self.description),
            field(&self.info),
        ]
    }
}
