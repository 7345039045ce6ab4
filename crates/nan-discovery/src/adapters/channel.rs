use tokio::sync::mpsc;
use tracing::warn;

use crate::events::DiscoveryEvent;
use crate::ports::EventSink;

/// Sends events to an async consumer
///
/// Sending never blocks. Events emitted after the receiver is dropped are
/// discarded with a warning.
#[derive(Clone, Debug)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<DiscoveryEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::UnboundedSender<DiscoveryEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DiscoveryEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&mut self, event: DiscoveryEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!(event = e.0.kind(), "Event receiver closed, dropping event");
        }
    }
}
