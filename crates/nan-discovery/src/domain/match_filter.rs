//! Matching filter codec and comparator
//!
//! Wire format: a flat sequence of `<length u8><value[length]>` entries.
//! Entry order is preserved through decode/encode but only matters to the
//! positional rule.

use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

/// A decoded matching filter
///
/// An empty filter is the wildcard. Under the positional rule a zero-length
/// entry is also a wildcard entry; under intersection it only equals another
/// zero-length entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchFilter {
    entries: Vec<Vec<u8>>,
}

/// How two matching filters are compared
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Match when the entry sets intersect or either side is the wildcard
    #[default]
    Intersection,
    /// NAN ordered comparison driven by the subscriber's filter
    Positional,
}

impl MatchFilter {
    /// Build a filter from already-split entries
    ///
    /// Entries longer than 255 bytes cannot be encoded and are rejected.
    pub fn new(entries: Vec<Vec<u8>>) -> Result<Self, DiscoveryError> {
        if let Some(entry) = entries.iter().find(|e| e.len() > u8::MAX as usize) {
            return Err(DiscoveryError::MalformedFilter {
                offset: 0,
                declared: entry.len(),
                remaining: u8::MAX as usize,
            });
        }
        Ok(Self { entries })
    }

    /// Decode the TLV representation
    pub fn decode(bytes: &[u8]) -> Result<Self, DiscoveryError> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let declared = bytes[pos] as usize;
            let remaining = bytes.len() - pos - 1;
            if declared > remaining {
                return Err(DiscoveryError::MalformedFilter {
                    offset: pos,
                    declared,
                    remaining,
                });
            }
            entries.push(bytes[pos + 1..pos + 1 + declared].to_vec());
            pos += 1 + declared;
        }

        Ok(Self { entries })
    }

    /// Decode from the hex form used on the control interface, e.g. `"051122334455"`
    pub fn from_hex(s: &str) -> Result<Self, DiscoveryError> {
        let bytes = hex::decode(s).map_err(|e| DiscoveryError::InvalidHex(e.to_string()))?;
        Self::decode(&bytes)
    }

    /// Encode back to the TLV representation
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for entry in &self.entries {
            out.push(entry.len() as u8);
            out.extend_from_slice(entry);
        }
        out
    }

    /// Number of bytes `encode` produces
    pub fn encoded_len(&self) -> usize {
        self.entries.iter().map(|e| e.len() + 1).sum()
    }

    pub fn entries(&self) -> &[Vec<u8>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// An empty filter accepts everything
    pub fn is_wildcard(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set-intersection test: some entry of `self` is byte-identical to some
    /// entry of `other`. Commutative.
    pub fn intersects(&self, other: &MatchFilter) -> bool {
        if self.is_wildcard() || other.is_wildcard() {
            return true;
        }
        self.entries
            .iter()
            .any(|a| other.entries.iter().any(|b| a == b))
    }

    /// Ordered comparison with `self` as the subscriber-owned filter
    ///
    /// Every non-wildcard entry of the subscriber filter must line up with a
    /// wildcard or equal entry at the same index of the publisher filter.
    /// Publisher entries past the end of the subscriber filter are ignored.
    pub fn matches_positionally(&self, publisher: &MatchFilter) -> bool {
        self.entries.iter().enumerate().all(|(i, entry)| {
            if entry.is_empty() {
                return true;
            }
            match publisher.entries.get(i) {
                Some(other) => other.is_empty() || other == entry,
                None => false,
            }
        })
    }
}

impl MatchRule {
    /// Compare the subscriber-owned and publisher-owned filters of one direction
    ///
    /// Absent filters behave like empty ones.
    pub fn evaluate(
        self,
        subscriber_filter: Option<&MatchFilter>,
        publisher_filter: Option<&MatchFilter>,
    ) -> bool {
        let empty = MatchFilter::default();
        let sub = subscriber_filter.unwrap_or(&empty);
        let publ = publisher_filter.unwrap_or(&empty);

        match self {
            MatchRule::Intersection => sub.intersects(publ),
            MatchRule::Positional => sub.matches_positionally(publ),
        }
    }
}
