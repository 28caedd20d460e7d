//! Codec configuration.
//!
//! # Example
//!
//! ```
//! use amqp_wire::config::{CodecConfig, DescriptorMode};
//!
//! let config = CodecConfig::from_json(r#"{ "descriptor_mode": "strict" }"#).unwrap();
//! assert_eq!(config.descriptor_mode, DescriptorMode::Strict);
//! assert_eq!(config.max_frame_size, 131_072);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, WireError};
use crate::protocol::ProtocolVersion;

/// Default maximum frame size (128 KB), header and frame end included.
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 131_072;

/// Smallest maximum frame size a peer may negotiate.
pub const MIN_FRAME_SIZE: u32 = 4096;

/// How a 1.0 decoder treats descriptors with no registered constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorMode {
    /// Fail with `UnknownDescriptor`.
    Strict,
    /// Skip the value and continue.
    #[default]
    Lenient,
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest frame accepted by `FrameBuffer`.
    pub max_frame_size: u32,
    /// Unknown-descriptor policy.
    pub descriptor_mode: DescriptorMode,
    /// Version whose method table the router decodes with.
    pub protocol: ProtocolVersion,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            descriptor_mode: DescriptorMode::default(),
            protocol: ProtocolVersion::default(),
        }
    }
}

impl CodecConfig {
    /// Parse and validate a JSON document. Missing keys take defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| WireError::InvalidConfig(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_frame_size < MIN_FRAME_SIZE {
            return Err(WireError::InvalidConfig(format!(
                "max_frame_size {} is below the minimum {}",
                self.max_frame_size, MIN_FRAME_SIZE
            )));
        }

        if !self.protocol.is_supported() {
            return Err(WireError::InvalidConfig(format!(
                "unsupported protocol version {}",
                self.protocol
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
        assert_eq!(config.descriptor_mode, DescriptorMode::Lenient);
        assert_eq!(config.protocol, ProtocolVersion::V0_9_1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(CodecConfig::from_json("{}").unwrap(), CodecConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = CodecConfig::from_json(
            r#"{
                "max_frame_size": 65536,
                "descriptor_mode": "strict",
                "protocol": { "major": 0, "minor": 8, "revision": 0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_frame_size, 65536);
        assert_eq!(config.descriptor_mode, DescriptorMode::Strict);
        assert_eq!(config.protocol, ProtocolVersion::V0_8);
    }

    #[test]
    fn test_frame_size_below_minimum() {
        let err = CodecConfig::from_json(r#"{ "max_frame_size": 512 }"#).unwrap_err();
        assert!(matches!(err, WireError::InvalidConfig(_)));
        assert!(err.to_string().contains("below the minimum"));
    }

    #[test]
    fn test_unsupported_protocol() {
        let err = CodecConfig::from_json(
            r#"{ "protocol": { "major": 0, "minor": 10, "revision": 0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported protocol version 0-10"));
    }

    #[test]
    fn test_malformed_json() {
        let err = CodecConfig::from_json("{ max_frame_size: }").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = CodecConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"lenient\""));
        assert_eq!(CodecConfig::from_json(&json).unwrap(), config);
    }
}
