//! Discovery and followup frames exchanged between devices
//!
//! Fields are already split out of the Service Descriptor attribute by the
//! transport. Matching filters and the SRF travel in their wire encoding and
//! are decoded by the receiver, so a malformed frame can be dropped there.

use serde::{Deserialize, Serialize};

use crate::domain::{
    InstanceId, MacAddress, MatchFilter, PublishMode, ServiceId, ServiceProtocolType,
    ServiceResponseFilter,
};

/// Which kind of Service Descriptor a frame carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvertisementKind {
    Publish(PublishMode),
    Subscribe { active: bool },
}

/// A Publish or Subscribe discovery frame
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    /// Address of the transmitting device
    pub source: MacAddress,
    /// Set for unicast solicited replies; `None` for broadcast frames
    pub destination: Option<MacAddress>,
    /// Instance on the transmitting device
    pub instance_id: InstanceId,
    pub service_id: ServiceId,
    pub kind: AdvertisementKind,
    pub protocol: ServiceProtocolType,
    /// TLV-encoded receive filter of the transmitting instance
    pub rx_filter: Option<Vec<u8>>,
    /// TLV-encoded transmit filter of the transmitting instance
    pub tx_filter: Option<Vec<u8>>,
    /// SRF attribute body (Subscribe frames only)
    pub srf: Option<Vec<u8>>,
    pub ssi: Vec<u8>,
}

impl Advertisement {
    pub fn is_publish(&self) -> bool {
        matches!(self.kind, AdvertisementKind::Publish(_))
    }

    /// Whether a device at `local` should look at this frame
    pub fn is_for(&self, local: &MacAddress) -> bool {
        self.source != *local && self.destination.map_or(true, |d| d == *local)
    }

    pub(crate) fn decode_rx_filter(&self) -> crate::Result<Option<MatchFilter>> {
        self.rx_filter.as_deref().map(MatchFilter::decode).transpose()
    }

    pub(crate) fn decode_tx_filter(&self) -> crate::Result<Option<MatchFilter>> {
        self.tx_filter.as_deref().map(MatchFilter::decode).transpose()
    }

    pub(crate) fn decode_srf(&self) -> crate::Result<Option<ServiceResponseFilter>> {
        self.srf
            .as_deref()
            .map(ServiceResponseFilter::from_bytes)
            .transpose()
    }
}

/// A followup message between matched instances
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followup {
    pub source: MacAddress,
    pub destination: MacAddress,
    /// Instance on the sending device
    pub sender_instance_id: InstanceId,
    /// Instance on the receiving device
    pub target_instance_id: InstanceId,
    pub ssi: Vec<u8>,
}
