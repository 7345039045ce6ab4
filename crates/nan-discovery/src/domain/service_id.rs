//! Service identity
//!
//! A NAN Service ID is the first 48 bits of SHA-256 over the service name,
//! with the name converted to lowercase first. It is the join key between
//! Publish and Subscribe instances on different devices.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Width of a Service ID in bytes
pub const SERVICE_ID_LEN: usize = 6;

/// Fixed-width service identifier derived from a service name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId([u8; SERVICE_ID_LEN]);

impl ServiceId {
    /// Derive the identifier for `name`. Never fails; any string is accepted.
    pub fn from_name(name: &str) -> Self {
        let digest = Sha256::digest(name.to_ascii_lowercase().as_bytes());
        let mut id = [0u8; SERVICE_ID_LEN];
        id.copy_from_slice(&digest[..SERVICE_ID_LEN]);
        Self(id)
    }

    /// Wrap an identifier received in a frame
    pub const fn from_bytes(bytes: [u8; SERVICE_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SERVICE_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
