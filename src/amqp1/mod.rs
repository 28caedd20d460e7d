//! AMQP 1.0 type system and described-type construction.
//!
//! 1.0 drops fixed method tables in favour of self-describing values. A
//! described value is `0x00`, a descriptor (symbol or ulong) and the value
//! it describes, almost always a list whose items are the type's fields in
//! order.
//!
//! - [`decoder`] / [`encoder`] handle the generic [`Value`] encoding.
//! - [`DescribedType`] maps a list onto a typed struct via [`ListFields`].
//! - [`DescriptorRegistry`] picks the constructor for a descriptor.
//! - [`security`] and [`transport`] hold the standard types.

mod codes;
pub mod decoder;
mod described;
pub mod encoder;
mod fields;
mod registry;
pub mod security;
pub mod transport;
mod types;

pub use described::{DescribedObject, DescribedType};
pub use fields::{field, multiple_field, FromValue, IntoValue, ListFields};
pub use registry::{Constructor, DescriptorRegistry, RegistryBuilder};
pub use types::{Described, Descriptor, Symbol, Value};
