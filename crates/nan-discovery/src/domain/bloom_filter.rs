//! SRF Bloom filter
//!
//! INVARIANTS:
//! - No false negatives: after `insert(a)`, `contains(a)` is true for the
//!   same `(length, index)` pair.
//! - Bit `k` of the bitmap is bit `k % 8` (LSB first) of byte `k / 8`, so
//!   `as_bytes()` is exactly what goes on the air.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::address::MacAddress;
use super::hash_functions::{compute_hash_positions, BLOOM_INDEX_MAX};
use crate::error::DiscoveryError;

/// Largest bitmap the SRF attribute can carry, in bytes
pub const MAX_BLOOM_LEN: usize = 255;

/// Bloom filter bitmap used by a Service Response Filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrfBloomFilter {
    /// Bitmap, `len_bytes * 8` bits
    #[serde(with = "bitmap_serde")]
    bits: BitVec<u8, Lsb0>,
    /// Hash function family selector (0..=3)
    index: u8,
    /// Number of addresses inserted
    n: usize,
}

/// The bitmap is always a whole number of bytes, so the raw bytes are enough
mod bitmap_serde {
    use bitvec::prelude::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bits: &BitVec<u8, Lsb0>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        bits.as_raw_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitVec<u8, Lsb0>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Ok(BitVec::<u8, Lsb0>::from_vec(bytes))
    }
}

fn check_parameters(len_bytes: usize, index: u8) -> Result<(), DiscoveryError> {
    if len_bytes == 0 {
        return Err(DiscoveryError::InvalidSrfParameters(format!(
            "bloom filter length is zero with index {}",
            index
        )));
    }
    if len_bytes > MAX_BLOOM_LEN {
        return Err(DiscoveryError::InvalidSrfParameters(format!(
            "bloom filter length {} exceeds {}",
            len_bytes, MAX_BLOOM_LEN
        )));
    }
    if index > BLOOM_INDEX_MAX {
        return Err(DiscoveryError::InvalidSrfParameters(format!(
            "bloom filter index {} outside 0..={}",
            index, BLOOM_INDEX_MAX
        )));
    }
    Ok(())
}

impl SrfBloomFilter {
    /// Create an empty filter of `len_bytes` bytes using hash family `index`
    pub fn new(len_bytes: usize, index: u8) -> Result<Self, DiscoveryError> {
        check_parameters(len_bytes, index)?;
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; len_bytes * 8],
            index,
            n: 0,
        })
    }

    /// Build a filter containing every address in `addresses`
    pub fn with_addresses<'a>(
        len_bytes: usize,
        index: u8,
        addresses: impl IntoIterator<Item = &'a MacAddress>,
    ) -> Result<Self, DiscoveryError> {
        let mut filter = Self::new(len_bytes, index)?;
        for addr in addresses {
            filter.insert(addr);
        }
        Ok(filter)
    }

    /// Wrap a bitmap received from a peer
    pub fn from_bitmap(bitmap: Vec<u8>, index: u8) -> Result<Self, DiscoveryError> {
        check_parameters(bitmap.len(), index)?;
        Ok(Self {
            bits: BitVec::<u8, Lsb0>::from_vec(bitmap),
            index,
            n: 0,
        })
    }

    pub fn insert(&mut self, addr: &MacAddress) {
        let m = self.bits.len();
        for pos in compute_hash_positions(addr.as_bytes(), self.index, m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    /// Test membership. False positives are possible, false negatives are not.
    pub fn contains(&self, addr: &MacAddress) -> bool {
        let m = self.bits.len();
        compute_hash_positions(addr.as_bytes(), self.index, m)
            .iter()
            .all(|&pos| self.bits[pos])
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn len_bytes(&self) -> usize {
        self.bits.len() / 8
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Addresses inserted locally; zero for a bitmap received from a peer
    pub fn elements_inserted(&self) -> usize {
        self.n
    }
}
