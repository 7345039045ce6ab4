//! Inbound Ports (Driving Ports)
//!
//! The API a host uses to manage instances on one device and to hand it the
//! frames its transport received.

use crate::domain::{InstanceId, MacAddress, PublishId, PublishParams, SubscribeId, SubscribeParams};
use crate::error::Result;
use crate::events::{Advertisement, Followup};

/// Primary discovery API (Driving Port)
pub trait DiscoveryApi {
    /// Start publishing a service
    ///
    /// # Errors
    /// - `PayloadTooLarge` when the payload or a filter exceeds the configured limit
    /// - `TooManyInstances` when the instance-id space is exhausted
    fn publish(&mut self, params: PublishParams) -> Result<PublishId>;

    /// Start searching for a service
    fn subscribe(&mut self, params: SubscribeParams) -> Result<SubscribeId>;

    /// Stop a Publish instance and drop its sessions
    fn cancel_publish(&mut self, id: PublishId) -> Result<()>;

    /// Stop a Subscribe instance and drop its sessions
    fn cancel_subscribe(&mut self, id: SubscribeId) -> Result<()>;

    /// Replace the service-specific info advertised by a Publish instance
    fn update_publish(&mut self, id: PublishId, ssi: Vec<u8>) -> Result<()>;

    /// Cancel every instance on the device
    fn flush(&mut self);

    /// Build a followup for a peer this instance has a session with
    ///
    /// # Errors
    /// `SessionNotEstablished` unless `(local, peer, peer_address)` is a live session
    fn transmit(
        &mut self,
        local: InstanceId,
        peer: InstanceId,
        peer_address: MacAddress,
        ssi: Vec<u8>,
    ) -> Result<Followup>;

    /// Process a received discovery frame
    ///
    /// Returns frames to send in response (solicited Publish replies).
    fn on_advertisement(&mut self, frame: &Advertisement) -> Vec<Advertisement>;

    /// Process a received followup
    ///
    /// # Errors
    /// `SessionNotEstablished` when the target instance does not exist or was cancelled
    fn on_followup(&mut self, frame: &Followup) -> Result<()>;
}
