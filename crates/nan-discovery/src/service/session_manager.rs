//! Discovery Session Manager
//!
//! One per device. Owns the device's Publish and Subscribe instances, runs
//! the matching decision on every inbound discovery frame, tracks sessions,
//! and gates followups on them.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::EventQueue;
use crate::domain::matching::{self, PublishView, SubscribeView};
use crate::domain::{
    Arena, DiscoveryConfig, Instance, InstanceId, MacAddress, MatchFilter, PeerKey,
    PublishId, PublishInstance, PublishMode, PublishParams, SubscribeId, SubscribeInstance,
    SubscribeParams,
};
use crate::error::{DiscoveryError, Result};
use crate::events::{
    Advertisement, AdvertisementKind, DiscoveryEvent, Followup, TerminationReason,
};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{DiscoveryApi, EventSink};

/// Session manager for a single device
///
/// Implements the `DiscoveryApi` port and reports everything through the
/// injected `EventSink`.
pub struct SessionManager<S = EventQueue> {
    address: MacAddress,
    config: DiscoveryConfig,
    instances: Arena<Instance>,
    sink: S,
    metrics: Arc<dyn MetricsRecorder>,
}

impl SessionManager<EventQueue> {
    /// Create a manager that queues events for the caller to drain
    pub fn new(address: MacAddress, config: DiscoveryConfig) -> Self {
        Self::with_sink(address, config, EventQueue::new())
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<DiscoveryEvent> {
        self.sink.drain()
    }
}

impl<S: EventSink> SessionManager<S> {
    pub fn with_sink(address: MacAddress, config: DiscoveryConfig, sink: S) -> Self {
        Self {
            address,
            instances: Arena::with_capacity(config.max_instances),
            config,
            sink,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn address(&self) -> MacAddress {
        self.address
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<dyn MetricsRecorder> {
        &self.metrics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id)
    }

    /// Whether `local` may send followups to `peer` at `address`
    pub fn has_session(&self, local: InstanceId, peer: InstanceId, address: MacAddress) -> bool {
        self.instances.get(local).map_or(false, |instance| {
            instance.has_session(&PeerKey {
                instance_id: peer,
                address,
            })
        })
    }

    /// Frames this device currently broadcasts
    ///
    /// One Publish frame per unsolicited Publish instance and one Subscribe
    /// frame per active Subscribe instance.
    pub fn advertisements(&self) -> Vec<Advertisement> {
        self.instances
            .iter()
            .filter_map(|(id, instance)| match instance {
                Instance::Publish(p) if p.mode.unsolicited => Some(self.publish_frame(id, p, None)),
                Instance::Subscribe(s) if s.active => Some(self.subscribe_frame(id, s)),
                _ => None,
            })
            .collect()
    }

    fn publish_frame(
        &self,
        id: PublishId,
        publ: &PublishInstance,
        destination: Option<MacAddress>,
    ) -> Advertisement {
        Advertisement {
            source: self.address,
            destination,
            instance_id: id,
            service_id: publ.service_id,
            kind: AdvertisementKind::Publish(publ.mode),
            protocol: publ.protocol,
            rx_filter: publ.rx_filter.as_ref().map(MatchFilter::encode),
            tx_filter: publ.tx_filter.as_ref().map(MatchFilter::encode),
            srf: None,
            ssi: publ.ssi.clone(),
        }
    }

    fn subscribe_frame(&self, id: SubscribeId, sub: &SubscribeInstance) -> Advertisement {
        Advertisement {
            source: self.address,
            destination: None,
            instance_id: id,
            service_id: sub.service_id,
            kind: AdvertisementKind::Subscribe { active: sub.active },
            protocol: sub.protocol,
            rx_filter: sub.rx_filter.as_ref().map(MatchFilter::encode),
            tx_filter: sub.tx_filter.as_ref().map(MatchFilter::encode),
            srf: sub.srf.as_ref().map(|srf| srf.to_bytes()),
            ssi: sub.ssi.clone(),
        }
    }

    fn check_ssi(&self, ssi: &[u8]) -> Result<()> {
        if ssi.len() > self.config.max_ssi_len {
            return Err(DiscoveryError::PayloadTooLarge {
                len: ssi.len(),
                max: self.config.max_ssi_len,
            });
        }
        Ok(())
    }

    fn check_filter(&self, filter: Option<&MatchFilter>) -> Result<()> {
        if let Some(filter) = filter {
            let len = filter.encoded_len();
            if len > self.config.max_match_filter_len {
                return Err(DiscoveryError::PayloadTooLarge {
                    len,
                    max: self.config.max_match_filter_len,
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, instance: Instance) -> Result<InstanceId> {
        self.instances
            .insert(instance)
            .map_err(|_| DiscoveryError::TooManyInstances {
                max: self.instances.capacity(),
            })
    }

    fn terminate(&mut self, id: InstanceId, reason: TerminationReason) {
        let Some(instance) = self.instances.remove(id) else {
            return;
        };
        let event = match instance {
            Instance::Publish(p) => {
                info!(device = %self.address, publish_id = %id, service = %p.service_name, ?reason, "Publish terminated");
                DiscoveryEvent::PublishTerminated {
                    publish_id: id,
                    reason,
                }
            }
            Instance::Subscribe(s) => {
                info!(device = %self.address, subscribe_id = %id, service = %s.service_name, ?reason, "Subscribe terminated");
                DiscoveryEvent::SubscribeTerminated {
                    subscribe_id: id,
                    reason,
                }
            }
        };
        self.sink.emit(event);
    }

    /// A remote Publish frame, checked against every local Subscribe
    fn handle_publish_frame(&mut self, frame: &Advertisement, mode: PublishMode) {
        let (rx_filter, tx_filter) = match (frame.decode_rx_filter(), frame.decode_tx_filter()) {
            (Ok(rx), Ok(tx)) => (rx, tx),
            (Err(e), _) | (_, Err(e)) => {
                self.drop_frame(frame, &e);
                return;
            }
        };

        let publ = PublishView {
            service_id: frame.service_id,
            address: frame.source,
            mode,
            rx_filter: rx_filter.as_ref(),
            tx_filter: tx_filter.as_ref(),
        };
        let local = self.address;
        let rule = self.config.match_rule;
        let peer = PeerKey {
            instance_id: frame.instance_id,
            address: frame.source,
        };

        let mut events = Vec::new();
        for (id, instance) in self.instances.iter_mut() {
            let Instance::Subscribe(sub) = instance else {
                continue;
            };
            let outcome = matching::evaluate(rule, &publ, &SubscribeView::of(sub, local));
            self.metrics.record_outcome(outcome);
            if !outcome.is_match() {
                debug!(device = %local, subscribe_id = %id, peer = %frame.source, ?outcome, "Publish not matched");
                continue;
            }
            if sub.sessions.insert(peer) {
                debug!(device = %local, subscribe_id = %id, publish_id = %frame.instance_id, peer = %frame.source, "Service discovered");
                events.push(DiscoveryEvent::DiscoveryResult {
                    subscribe_id: id,
                    publish_id: frame.instance_id,
                    peer_address: frame.source,
                    protocol: frame.protocol,
                    ssi: frame.ssi.clone(),
                });
            }
        }

        for event in events {
            self.sink.emit(event);
        }
    }

    /// A remote Subscribe frame, checked against every local Publish
    fn handle_subscribe_frame(&mut self, frame: &Advertisement, active: bool) -> Vec<Advertisement> {
        let decoded = frame
            .decode_rx_filter()
            .and_then(|rx| Ok((rx, frame.decode_tx_filter()?, frame.decode_srf()?)));
        let (rx_filter, tx_filter, srf) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                self.drop_frame(frame, &e);
                return Vec::new();
            }
        };

        let sub = SubscribeView {
            service_id: frame.service_id,
            address: frame.source,
            active,
            rx_filter: rx_filter.as_ref(),
            tx_filter: tx_filter.as_ref(),
            srf: srf.as_ref(),
        };
        let local = self.address;
        let rule = self.config.match_rule;
        let peer = PeerKey {
            instance_id: frame.instance_id,
            address: frame.source,
        };

        let mut events = Vec::new();
        let mut replying = Vec::new();
        for (id, instance) in self.instances.iter_mut() {
            let Instance::Publish(publ) = instance else {
                continue;
            };
            let outcome = matching::evaluate(rule, &PublishView::of(publ, local), &sub);
            self.metrics.record_outcome(outcome);
            if !outcome.replies() {
                debug!(device = %local, publish_id = %id, peer = %frame.source, ?outcome, "Subscribe not answered");
                continue;
            }
            replying.push(id);
            if publ.sessions.insert(peer) {
                debug!(device = %local, publish_id = %id, subscribe_id = %frame.instance_id, peer = %frame.source, "Replied to subscriber");
                events.push(DiscoveryEvent::Replied {
                    publish_id: id,
                    subscribe_id: frame.instance_id,
                    peer_address: frame.source,
                    protocol: frame.protocol,
                    ssi: frame.ssi.clone(),
                });
            }
        }

        for event in events {
            self.sink.emit(event);
        }

        let mut replies = Vec::with_capacity(replying.len());
        for id in replying {
            if let Some(Instance::Publish(publ)) = self.instances.get(id) {
                replies.push(self.publish_frame(id, publ, Some(frame.source)));
                self.metrics.record_reply();
            }
        }
        replies
    }

    fn drop_frame(&self, frame: &Advertisement, error: &DiscoveryError) {
        self.metrics.record_dropped();
        warn!(device = %self.address, peer = %frame.source, instance = %frame.instance_id, %error, "Dropping malformed discovery frame");
    }
}

impl<S: EventSink> DiscoveryApi for SessionManager<S> {
    fn publish(&mut self, params: PublishParams) -> Result<PublishId> {
        self.check_ssi(&params.ssi)?;
        self.check_filter(params.rx_filter.as_ref())?;
        self.check_filter(params.tx_filter.as_ref())?;

        let instance = PublishInstance::from_params(params);
        let service = instance.service_name.clone();
        let service_id = instance.service_id;
        let id = self.insert(Instance::Publish(instance))?;

        info!(device = %self.address, publish_id = %id, %service, %service_id, "Publish started");
        Ok(id)
    }

    fn subscribe(&mut self, params: SubscribeParams) -> Result<SubscribeId> {
        self.check_ssi(&params.ssi)?;
        self.check_filter(params.rx_filter.as_ref())?;
        self.check_filter(params.tx_filter.as_ref())?;
        if let Some(srf) = &params.srf {
            let len = srf.to_bytes().len();
            if len > self.config.max_srf_len {
                return Err(DiscoveryError::PayloadTooLarge {
                    len,
                    max: self.config.max_srf_len,
                });
            }
        }

        let instance = SubscribeInstance::from_params(params);
        let service = instance.service_name.clone();
        let service_id = instance.service_id;
        let active = instance.active;
        let id = self.insert(Instance::Subscribe(instance))?;

        info!(device = %self.address, subscribe_id = %id, %service, %service_id, active, "Subscribe started");
        Ok(id)
    }

    fn cancel_publish(&mut self, id: PublishId) -> Result<()> {
        match self.instances.get(id) {
            Some(Instance::Publish(_)) => {
                self.terminate(id, TerminationReason::UserRequest);
                Ok(())
            }
            _ => Err(DiscoveryError::InstanceNotFound(id)),
        }
    }

    fn cancel_subscribe(&mut self, id: SubscribeId) -> Result<()> {
        match self.instances.get(id) {
            Some(Instance::Subscribe(_)) => {
                self.terminate(id, TerminationReason::UserRequest);
                Ok(())
            }
            _ => Err(DiscoveryError::InstanceNotFound(id)),
        }
    }

    fn update_publish(&mut self, id: PublishId, ssi: Vec<u8>) -> Result<()> {
        self.check_ssi(&ssi)?;
        match self.instances.get_mut(id) {
            Some(Instance::Publish(publ)) => {
                publ.ssi = ssi;
                debug!(device = %self.address, publish_id = %id, "Publish payload updated");
                Ok(())
            }
            _ => Err(DiscoveryError::InstanceNotFound(id)),
        }
    }

    fn flush(&mut self) {
        for id in self.instances.ids() {
            self.terminate(id, TerminationReason::Flush);
        }
    }

    fn transmit(
        &mut self,
        local: InstanceId,
        peer: InstanceId,
        peer_address: MacAddress,
        ssi: Vec<u8>,
    ) -> Result<Followup> {
        if !self.has_session(local, peer, peer_address) {
            return Err(DiscoveryError::SessionNotEstablished {
                local,
                peer,
                address: peer_address,
            });
        }
        self.check_ssi(&ssi)?;

        self.metrics.record_followup_sent();
        debug!(device = %self.address, local = %local, peer = %peer, %peer_address, len = ssi.len(), "Followup sent");
        Ok(Followup {
            source: self.address,
            destination: peer_address,
            sender_instance_id: local,
            target_instance_id: peer,
            ssi,
        })
    }

    fn on_advertisement(&mut self, frame: &Advertisement) -> Vec<Advertisement> {
        if !frame.is_for(&self.address) {
            return Vec::new();
        }
        self.metrics.record_advertisement();

        match frame.kind {
            AdvertisementKind::Publish(mode) => {
                self.handle_publish_frame(frame, mode);
                Vec::new()
            }
            AdvertisementKind::Subscribe { active } => self.handle_subscribe_frame(frame, active),
        }
    }

    fn on_followup(&mut self, frame: &Followup) -> Result<()> {
        if frame.destination != self.address {
            return Ok(());
        }

        // A stale generation resolves to nothing, so cancelled targets land here too
        let target = frame.target_instance_id;
        let instance = self.instances.get_mut(target).ok_or(
            DiscoveryError::SessionNotEstablished {
                local: target,
                peer: frame.sender_instance_id,
                address: frame.source,
            },
        )?;
        instance.sessions_mut().insert(PeerKey {
            instance_id: frame.sender_instance_id,
            address: frame.source,
        });

        self.metrics.record_followup_received();
        debug!(device = %self.address, local = %target, peer = %frame.sender_instance_id, peer_address = %frame.source, "Followup received");
        self.sink.emit(DiscoveryEvent::Receive {
            local_instance_id: target,
            peer_instance_id: frame.sender_instance_id,
            peer_address: frame.source,
            ssi: frame.ssi.clone(),
        });
        Ok(())
    }
}
