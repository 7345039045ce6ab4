//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - management API and frame intake
//! - Driven Ports (outbound) - where discovery events go

pub mod inbound;
pub mod outbound;

pub use inbound::DiscoveryApi;
pub use outbound::EventSink;
