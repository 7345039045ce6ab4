//! Domain Layer - Pure discovery logic
//!
//! This layer contains:
//! - Link addresses and service identifiers
//! - Matching filter codec and comparators
//! - SRF (address list and Bloom filter forms)
//! - Publish/Subscribe instances and the instance arena
//! - The matching decision
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod address;
pub mod arena;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod instance;
pub mod match_filter;
pub mod matching;
pub mod service_id;
pub mod srf;

pub use address::{MacAddress, MAC_ADDRESS_LEN};
pub use arena::{Arena, InstanceId, PublishId, SubscribeId};
pub use bloom_filter::{SrfBloomFilter, MAX_BLOOM_LEN};
pub use config::{DiscoveryConfig, DiscoveryConfigBuilder};
pub use instance::{
    Instance, PeerKey, PublishInstance, PublishMode, PublishParams, ServiceProtocolType,
    SubscribeInstance, SubscribeParams,
};
pub use match_filter::{MatchFilter, MatchRule};
pub use matching::{MatchOutcome, PublishView, SubscribeView};
pub use service_id::{ServiceId, SERVICE_ID_LEN};
pub use srf::{ServiceResponseFilter, SrfAddressSet, SrfParams};
