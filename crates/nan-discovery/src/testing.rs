//! Multi-device test harness
//!
//! `InMemoryMedium` stands in for the radio: it carries broadcast frames to
//! every other device, unicast replies to their destination, and followups to
//! the device they address. Available with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```ignore
//! use nan_discovery::testing::InMemoryMedium;
//!
//! let mut medium = InMemoryMedium::new();
//! let dev0 = medium.add_device();
//! let dev1 = medium.add_device();
//! medium.device_mut(dev0).publish(PublishParams::new("svc"))?;
//! medium.device_mut(dev1).subscribe(SubscribeParams::new("svc"))?;
//! medium.run_round();
//! ```

use std::sync::Arc;

use crate::domain::{DiscoveryConfig, MacAddress};
use crate::error::Result;
use crate::events::{Advertisement, DiscoveryEvent, Followup};
use crate::metrics::Metrics;
use crate::ports::DiscoveryApi;
use crate::service::SessionManager;

/// Locally administered address of the `n`th test device: `02:00:00:00:0n:00`
pub fn device_address(n: u8) -> MacAddress {
    MacAddress::new([0x02, 0x00, 0x00, 0x00, n, 0x00])
}

/// Devices sharing one lossless medium
pub struct InMemoryMedium {
    config: DiscoveryConfig,
    devices: Vec<SessionManager>,
    metrics: Arc<Metrics>,
}

impl Default for InMemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMedium {
    pub fn new() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }

    /// Every device added later uses `config`
    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self {
            config,
            devices: Vec::new(),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Add a device at the next `device_address`; returns its index
    ///
    /// # Panics
    /// When the medium already holds 256 devices (the address space of `device_address`).
    pub fn add_device(&mut self) -> usize {
        let index = self.devices.len();
        let n = u8::try_from(index).expect("InMemoryMedium holds at most 256 devices");
        let address = device_address(n);
        let device = SessionManager::new(address, self.config.clone())
            .with_metrics(self.metrics.clone());
        self.devices.push(device);
        index
    }

    pub fn device(&self, index: usize) -> &SessionManager {
        &self.devices[index]
    }

    pub fn device_mut(&mut self, index: usize) -> &mut SessionManager {
        &mut self.devices[index]
    }

    pub fn address(&self, index: usize) -> MacAddress {
        self.devices[index].address()
    }

    /// Counters shared by all devices on the medium
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Deliver one frame to every device, returning the replies it caused
    pub fn deliver(&mut self, frame: &Advertisement) -> Vec<Advertisement> {
        self.devices
            .iter_mut()
            .flat_map(|device| device.on_advertisement(frame))
            .collect()
    }

    /// Every device transmits once; replies are delivered until none remain
    pub fn run_round(&mut self) {
        let mut pending: Vec<Advertisement> = self
            .devices
            .iter()
            .flat_map(|device| device.advertisements())
            .collect();

        while !pending.is_empty() {
            let mut replies = Vec::new();
            for frame in &pending {
                replies.extend(self.deliver(frame));
            }
            pending = replies;
        }
    }

    pub fn run_rounds(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.run_round();
        }
    }

    /// Hand a followup to the device it addresses
    ///
    /// Followups for addresses not on the medium are lost.
    pub fn send_followup(&mut self, followup: &Followup) -> Result<()> {
        match self
            .devices
            .iter_mut()
            .find(|device| device.address() == followup.destination)
        {
            Some(device) => device.on_followup(followup),
            None => Ok(()),
        }
    }

    pub fn drain_events(&mut self, index: usize) -> Vec<DiscoveryEvent> {
        self.devices[index].drain_events()
    }
}
