//! Error types for the NAN discovery engine

use thiserror::Error;

use crate::domain::{InstanceId, MacAddress};

/// Errors returned by the discovery engine.
///
/// All of these are local and recoverable; the engine never retries on its
/// own and never treats any of them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("Malformed match filter: entry at offset {offset} declares {declared} bytes, {remaining} remain")]
    MalformedFilter {
        offset: usize,
        declared: usize,
        remaining: usize,
    },

    #[error("Invalid SRF parameters: {0}")]
    InvalidSrfParameters(String),

    #[error("Instance not found: {0}")]
    InstanceNotFound(InstanceId),

    #[error("No session between instance {local} and peer instance {peer} at {address}")]
    SessionNotEstablished {
        local: InstanceId,
        peer: InstanceId,
        address: MacAddress,
    },

    #[error("Too many instances: limit is {max}")]
    TooManyInstances { max: usize },

    #[error("Payload too large: {len} > {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Invalid link address: {0}")]
    InvalidAddress(String),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] DiscoveryError),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiscoveryError>;
