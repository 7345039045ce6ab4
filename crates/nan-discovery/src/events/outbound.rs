//! Events produced for the local application

use serde::{Deserialize, Serialize};

use crate::domain::{InstanceId, MacAddress, PublishId, ServiceProtocolType, SubscribeId};

/// Why an instance stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Cancelled through the management API
    UserRequest,
    /// Removed by `flush`
    Flush,
}

/// Notification emitted by a device's session manager
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiscoveryEvent {
    /// A local Subscribe matched a remote Publish
    DiscoveryResult {
        subscribe_id: SubscribeId,
        publish_id: PublishId,
        peer_address: MacAddress,
        protocol: ServiceProtocolType,
        /// The publisher's service-specific info
        ssi: Vec<u8>,
    },
    /// A local Publish answered an active remote Subscribe
    Replied {
        publish_id: PublishId,
        subscribe_id: SubscribeId,
        peer_address: MacAddress,
        protocol: ServiceProtocolType,
        /// The subscriber's service-specific info
        ssi: Vec<u8>,
    },
    /// A followup arrived for a local instance
    Receive {
        local_instance_id: InstanceId,
        peer_instance_id: InstanceId,
        peer_address: MacAddress,
        ssi: Vec<u8>,
    },
    PublishTerminated {
        publish_id: PublishId,
        reason: TerminationReason,
    },
    SubscribeTerminated {
        subscribe_id: SubscribeId,
        reason: TerminationReason,
    },
}

impl DiscoveryEvent {
    /// Short name of the event kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DiscoveryEvent::DiscoveryResult { .. } => "discovery-result",
            DiscoveryEvent::Replied { .. } => "replied",
            DiscoveryEvent::Receive { .. } => "receive",
            DiscoveryEvent::PublishTerminated { .. } => "publish-terminated",
            DiscoveryEvent::SubscribeTerminated { .. } => "subscribe-terminated",
        }
    }

    /// Serialize as a single JSON line for external consumers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
