//! Link-layer addresses of NAN devices

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

/// Length of a link address in bytes
pub const MAC_ADDRESS_LEN: usize = 6;

/// A 6-byte NAN management interface address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MacAddress([u8; MAC_ADDRESS_LEN]);

impl MacAddress {
    pub const fn new(bytes: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; MAC_ADDRESS_LEN] {
        &self.0
    }

    /// Build an address from a slice that must be exactly 6 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DiscoveryError> {
        let raw: [u8; MAC_ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            DiscoveryError::InvalidAddress(format!("expected 6 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(raw))
    }
}

impl From<[u8; MAC_ADDRESS_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Accepts `aa:bb:cc:dd:ee:ff` as well as the colon-less `aabbccddeeff`.
impl FromStr for MacAddress {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| *c != ':').collect();
        if compact.len() != MAC_ADDRESS_LEN * 2 {
            return Err(DiscoveryError::InvalidAddress(s.to_string()));
        }
        let bytes = hex::decode(&compact).map_err(|_| DiscoveryError::InvalidAddress(s.to_string()))?;
        Self::from_slice(&bytes)
    }
}
