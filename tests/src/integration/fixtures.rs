//! Shared helpers for the integration scenarios

use nan_discovery::testing::InMemoryMedium;
use nan_discovery::{
    DiscoveryConfig, DiscoveryEvent, InstanceId, MacAddress, MatchFilter, MatchRule,
};

pub(crate) const PSSI: &str = "aabbccdd001122334455667788";
pub(crate) const SSSI: &str = "ddbbccaa001122334455667788";

/// Rounds that are always enough for two devices to settle
pub(crate) const SETTLE_ROUNDS: usize = 3;

pub(crate) fn ssi(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("fixture hex must be valid")
}

pub(crate) fn filter(hex_str: &str) -> MatchFilter {
    MatchFilter::from_hex(hex_str).expect("fixture filter must be valid")
}

/// Medium whose devices compare matching filters position by position
pub(crate) fn positional_medium() -> InMemoryMedium {
    InMemoryMedium::with_config(DiscoveryConfig::default().with_match_rule(MatchRule::Positional))
}

/// `(subscribe_id, publish_id, peer_address, ssi)` of every `DiscoveryResult`
pub(crate) fn discoveries(
    events: &[DiscoveryEvent],
) -> Vec<(InstanceId, InstanceId, MacAddress, Vec<u8>)> {
    events
        .iter()
        .filter_map(|event| match event {
            DiscoveryEvent::DiscoveryResult {
                subscribe_id,
                publish_id,
                peer_address,
                ssi,
                ..
            } => Some((*subscribe_id, *publish_id, *peer_address, ssi.clone())),
            _ => None,
        })
        .collect()
}

/// `(publish_id, subscribe_id, peer_address, ssi)` of every `Replied`
pub(crate) fn replies(
    events: &[DiscoveryEvent],
) -> Vec<(InstanceId, InstanceId, MacAddress, Vec<u8>)> {
    events
        .iter()
        .filter_map(|event| match event {
            DiscoveryEvent::Replied {
                publish_id,
                subscribe_id,
                peer_address,
                ssi,
                ..
            } => Some((*publish_id, *subscribe_id, *peer_address, ssi.clone())),
            _ => None,
        })
        .collect()
}
