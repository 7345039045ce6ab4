//! # NAN Discovery
//!
//! Wi-Fi Aware (Neighbor Awareness Networking) service discovery matching
//! engine: decides which Publish and Subscribe instances on nearby devices
//! match, reports discoveries, and gates followup messages on established
//! sessions.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `ServiceId`: truncated SHA-256 of the lowercased service name
//!   - `MatchFilter` / `MatchRule`: length-prefixed filter codec and comparators
//!   - `ServiceResponseFilter`: address list or Bloom filter of peer addresses
//!   - `matching::evaluate`: the Publish/Subscribe match decision
//!   - `DiscoveryConfig`: configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `DiscoveryApi`: Driving port (management API and frame intake)
//!   - `EventSink`: Driven port (where events go)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `SessionManager`: per-device instances, sessions and followups
//!
//! - **Events Layer** (`events/`): frames between devices and events to the application
//!
//! - **Adapters Layer** (`adapters/`): `EventQueue`, `ChannelEventSink`
//!
//! ## Invariants
//!
//! - Matching is symmetric in outcome: both devices of a pair reach the same decision
//! - A Bloom-form SRF never rejects an address it was built with
//! - At most one `DiscoveryResult` / `Replied` per (local instance, peer instance, peer address)
//! - Followups need an established session
//!
//! ## Usage Example
//!
//! ```ignore
//! use nan_discovery::{DiscoveryApi, DiscoveryConfig, PublishParams, SessionManager, SubscribeParams};
//!
//! let mut publisher = SessionManager::new("02:00:00:00:00:00".parse()?, DiscoveryConfig::default());
//! let mut subscriber = SessionManager::new("02:00:00:00:01:00".parse()?, DiscoveryConfig::default());
//!
//! publisher.publish(PublishParams::new("test_service").with_ssi(b"hello".to_vec()))?;
//! let sub_id = subscriber.subscribe(SubscribeParams::new("test_service"))?;
//!
//! for frame in publisher.advertisements() {
//!     subscriber.on_advertisement(&frame);
//! }
//! for event in subscriber.drain_events() {
//!     println!("{}", event.to_json()?);
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod telemetry;

/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports for convenience
pub use adapters::{ChannelEventSink, EventQueue};
pub use domain::{
    DiscoveryConfig, DiscoveryConfigBuilder, InstanceId, MacAddress, MatchFilter, MatchRule,
    PublishId, PublishMode, PublishParams, ServiceId, ServiceProtocolType,
    ServiceResponseFilter, SrfBloomFilter, SrfParams, SubscribeId, SubscribeParams,
};
pub use error::{ConfigError, DiscoveryError, Result};
pub use events::{Advertisement, AdvertisementKind, DiscoveryEvent, Followup, TerminationReason};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{DiscoveryApi, EventSink};
pub use service::SessionManager;
pub use telemetry::{init_tracing, TracingConfig};
