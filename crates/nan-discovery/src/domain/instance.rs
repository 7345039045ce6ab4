//! Publish and Subscribe instances owned by a device

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::address::MacAddress;
use super::arena::InstanceId;
use super::match_filter::MatchFilter;
use super::service_id::ServiceId;
use super::srf::ServiceResponseFilter;

/// Service protocol type carried alongside the service-specific info
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ServiceProtocolType {
    Bonjour,
    #[default]
    Generic,
    CsaMatter,
    VendorSpecific,
    Other(u8),
}

impl From<u8> for ServiceProtocolType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Bonjour,
            2 => Self::Generic,
            3 => Self::CsaMatter,
            255 => Self::VendorSpecific,
            v => Self::Other(v),
        }
    }
}

impl From<ServiceProtocolType> for u8 {
    fn from(value: ServiceProtocolType) -> Self {
        match value {
            ServiceProtocolType::Bonjour => 1,
            ServiceProtocolType::Generic => 2,
            ServiceProtocolType::CsaMatter => 3,
            ServiceProtocolType::VendorSpecific => 255,
            ServiceProtocolType::Other(v) => v,
        }
    }
}

/// Which transmissions a Publish instance makes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishMode {
    /// Broadcast Publish frames without being asked
    pub unsolicited: bool,
    /// Answer active Subscribe frames
    pub solicited: bool,
}

impl Default for PublishMode {
    fn default() -> Self {
        Self {
            unsolicited: true,
            solicited: true,
        }
    }
}

/// Request to start publishing a service
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishParams {
    pub service_name: String,
    pub protocol: ServiceProtocolType,
    pub mode: PublishMode,
    /// What this publisher accepts from subscribers
    pub rx_filter: Option<MatchFilter>,
    /// What this publisher advertises to subscribers
    pub tx_filter: Option<MatchFilter>,
    pub ssi: Vec<u8>,
}

impl PublishParams {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_ssi(mut self, ssi: impl Into<Vec<u8>>) -> Self {
        self.ssi = ssi.into();
        self
    }

    pub fn with_mode(mut self, unsolicited: bool, solicited: bool) -> Self {
        self.mode = PublishMode {
            unsolicited,
            solicited,
        };
        self
    }

    pub fn with_rx_filter(mut self, filter: MatchFilter) -> Self {
        self.rx_filter = Some(filter);
        self
    }

    pub fn with_tx_filter(mut self, filter: MatchFilter) -> Self {
        self.tx_filter = Some(filter);
        self
    }

    pub fn with_protocol(mut self, protocol: ServiceProtocolType) -> Self {
        self.protocol = protocol;
        self
    }
}

/// Request to start searching for a service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscribeParams {
    pub service_name: String,
    pub protocol: ServiceProtocolType,
    /// Active subscribers transmit Subscribe frames; passive ones only listen
    pub active: bool,
    pub rx_filter: Option<MatchFilter>,
    pub tx_filter: Option<MatchFilter>,
    pub srf: Option<ServiceResponseFilter>,
    pub ssi: Vec<u8>,
}

impl SubscribeParams {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            protocol: ServiceProtocolType::default(),
            active: true,
            rx_filter: None,
            tx_filter: None,
            srf: None,
            ssi: Vec::new(),
        }
    }

    pub fn with_ssi(mut self, ssi: impl Into<Vec<u8>>) -> Self {
        self.ssi = ssi.into();
        self
    }

    pub fn passive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_rx_filter(mut self, filter: MatchFilter) -> Self {
        self.rx_filter = Some(filter);
        self
    }

    pub fn with_tx_filter(mut self, filter: MatchFilter) -> Self {
        self.tx_filter = Some(filter);
        self
    }

    pub fn with_srf(mut self, srf: ServiceResponseFilter) -> Self {
        self.srf = Some(srf);
        self
    }

    pub fn with_protocol(mut self, protocol: ServiceProtocolType) -> Self {
        self.protocol = protocol;
        self
    }
}

/// Peer end of a session: the remote instance and the device it lives on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PeerKey {
    pub instance_id: InstanceId,
    pub address: MacAddress,
}

#[derive(Clone, Debug)]
pub struct PublishInstance {
    pub service_id: ServiceId,
    pub service_name: String,
    pub protocol: ServiceProtocolType,
    pub mode: PublishMode,
    pub rx_filter: Option<MatchFilter>,
    pub tx_filter: Option<MatchFilter>,
    pub ssi: Vec<u8>,
    pub(crate) sessions: HashSet<PeerKey>,
}

impl PublishInstance {
    pub fn from_params(params: PublishParams) -> Self {
        Self {
            service_id: ServiceId::from_name(&params.service_name),
            service_name: params.service_name,
            protocol: params.protocol,
            mode: params.mode,
            rx_filter: params.rx_filter,
            tx_filter: params.tx_filter,
            ssi: params.ssi,
            sessions: HashSet::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscribeInstance {
    pub service_id: ServiceId,
    pub service_name: String,
    pub protocol: ServiceProtocolType,
    pub active: bool,
    pub rx_filter: Option<MatchFilter>,
    pub tx_filter: Option<MatchFilter>,
    pub srf: Option<ServiceResponseFilter>,
    pub ssi: Vec<u8>,
    pub(crate) sessions: HashSet<PeerKey>,
}

impl SubscribeInstance {
    pub fn from_params(params: SubscribeParams) -> Self {
        Self {
            service_id: ServiceId::from_name(&params.service_name),
            service_name: params.service_name,
            protocol: params.protocol,
            active: params.active,
            rx_filter: params.rx_filter,
            tx_filter: params.tx_filter,
            srf: params.srf,
            ssi: params.ssi,
            sessions: HashSet::new(),
        }
    }
}

/// Either kind of instance; both share one id space per device
#[derive(Clone, Debug)]
pub enum Instance {
    Publish(PublishInstance),
    Subscribe(SubscribeInstance),
}

impl Instance {
    pub fn sessions(&self) -> &HashSet<PeerKey> {
        match self {
            Instance::Publish(p) => &p.sessions,
            Instance::Subscribe(s) => &s.sessions,
        }
    }

    pub(crate) fn sessions_mut(&mut self) -> &mut HashSet<PeerKey> {
        match self {
            Instance::Publish(p) => &mut p.sessions,
            Instance::Subscribe(s) => &mut s.sessions,
        }
    }

    pub fn has_session(&self, peer: &PeerKey) -> bool {
        self.sessions().contains(peer)
    }
}
