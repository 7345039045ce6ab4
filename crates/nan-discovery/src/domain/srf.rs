//! Service Response Filter
//!
//! A Subscribe instance may restrict which publishers it accepts by link
//! address, either with an explicit address list or a Bloom filter, and
//! either including or excluding the addresses in the set.
//!
//! Attribute body layout:
//!
//! ```text
//! +-------------+------------------------------------------+
//! | SRF Control | address list (N * 6 bytes) or BF bitmap  |
//! +-------------+------------------------------------------+
//!   bit 0     : 1 = Bloom filter, 0 = address list
//!   bit 1     : include
//!   bits 2..3 : Bloom filter index
//! ```

use serde::{Deserialize, Serialize};

use super::address::{MacAddress, MAC_ADDRESS_LEN};
use super::bloom_filter::SrfBloomFilter;
use crate::error::DiscoveryError;

const CTRL_BLOOM_FILTER: u8 = 0x01;
const CTRL_INCLUDE: u8 = 0x02;
const CTRL_INDEX_SHIFT: u8 = 2;
const CTRL_INDEX_MASK: u8 = 0x0C;

/// Membership representation of an SRF
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SrfAddressSet {
    List(Vec<MacAddress>),
    Bloom(SrfBloomFilter),
}

/// A Service Response Filter attached to a Subscribe instance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponseFilter {
    include: bool,
    set: SrfAddressSet,
}

/// Raw SRF settings as a management client supplies them
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrfParams {
    /// Include (true) or exclude (false) the listed addresses
    pub include: bool,
    /// Flat concatenation of 6-byte addresses
    pub address_list: Vec<u8>,
    /// Bloom filter length in bytes; 0 means "use the explicit list"
    pub bloom_len: usize,
    /// Bloom filter index, if one was supplied
    pub bloom_index: Option<u8>,
}

/// Split a flat byte string into 6-byte addresses
pub fn parse_address_list(bytes: &[u8]) -> Result<Vec<MacAddress>, DiscoveryError> {
    if bytes.len() % MAC_ADDRESS_LEN != 0 {
        return Err(DiscoveryError::InvalidSrfParameters(format!(
            "address list length {} is not a multiple of {}",
            bytes.len(),
            MAC_ADDRESS_LEN
        )));
    }
    bytes
        .chunks_exact(MAC_ADDRESS_LEN)
        .map(MacAddress::from_slice)
        .collect()
}

impl ServiceResponseFilter {
    /// SRF carrying the explicit address list
    pub fn from_addresses(addresses: Vec<MacAddress>, include: bool) -> Self {
        Self {
            include,
            set: SrfAddressSet::List(addresses),
        }
    }

    /// SRF carrying a Bloom filter built over `addresses`
    pub fn bloom(
        addresses: &[MacAddress],
        len_bytes: usize,
        index: u8,
        include: bool,
    ) -> Result<Self, DiscoveryError> {
        let filter = SrfBloomFilter::with_addresses(len_bytes, index, addresses)?;
        Ok(Self {
            include,
            set: SrfAddressSet::Bloom(filter),
        })
    }

    /// Validate and build from management parameters
    pub fn from_params(params: &SrfParams) -> Result<Self, DiscoveryError> {
        let addresses = parse_address_list(&params.address_list)?;

        match (params.bloom_len, params.bloom_index) {
            (0, Some(index)) => Err(DiscoveryError::InvalidSrfParameters(format!(
                "bloom filter index {} supplied without a bitmap length",
                index
            ))),
            (0, None) => Ok(Self::from_addresses(addresses, params.include)),
            (len, index) => Self::bloom(&addresses, len, index.unwrap_or(0), params.include),
        }
    }

    pub fn include(&self) -> bool {
        self.include
    }

    pub fn address_set(&self) -> &SrfAddressSet {
        &self.set
    }

    pub fn is_bloom(&self) -> bool {
        matches!(self.set, SrfAddressSet::Bloom(_))
    }

    /// Set membership, ignoring the include/exclude policy
    pub fn contains(&self, addr: &MacAddress) -> bool {
        match &self.set {
            SrfAddressSet::List(list) => list.contains(addr),
            SrfAddressSet::Bloom(filter) => filter.contains(addr),
        }
    }

    /// Whether a publisher at `addr` passes this filter
    pub fn is_relevant(&self, addr: &MacAddress) -> bool {
        self.include == self.contains(addr)
    }

    /// Encode the SRF attribute body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ctrl = if self.include { CTRL_INCLUDE } else { 0 };
        let mut out = Vec::new();

        match &self.set {
            SrfAddressSet::List(list) => {
                out.push(ctrl);
                for addr in list {
                    out.extend_from_slice(addr.as_bytes());
                }
            }
            SrfAddressSet::Bloom(filter) => {
                ctrl |= CTRL_BLOOM_FILTER | (filter.index() << CTRL_INDEX_SHIFT);
                out.push(ctrl);
                out.extend_from_slice(filter.as_bytes());
            }
        }
        out
    }

    /// Decode an SRF attribute body
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DiscoveryError> {
        let (&ctrl, body) = bytes.split_first().ok_or_else(|| {
            DiscoveryError::InvalidSrfParameters("missing SRF control field".to_string())
        })?;
        let include = ctrl & CTRL_INCLUDE != 0;

        if ctrl & CTRL_BLOOM_FILTER != 0 {
            let index = (ctrl & CTRL_INDEX_MASK) >> CTRL_INDEX_SHIFT;
            let filter = SrfBloomFilter::from_bitmap(body.to_vec(), index)?;
            Ok(Self {
                include,
                set: SrfAddressSet::Bloom(filter),
            })
        } else {
            Ok(Self::from_addresses(parse_address_list(body)?, include))
        }
    }
}
