//! Events Layer - frames in, events out
//!
//! `frames` are what the transport hands the engine (and what the engine
//! asks the transport to send). `outbound` are the notifications a device
//! produces for its application.

pub mod frames;
pub mod outbound;

pub use frames::{Advertisement, AdvertisementKind, Followup};
pub use outbound::{DiscoveryEvent, TerminationReason};
