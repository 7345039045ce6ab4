//! Metrics hooks for discovery operations
//!
//! Counters cover inbound frame handling, the reason a candidate pair was
//! filtered out, and followup traffic.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use nan_discovery::metrics::Metrics;
//!
//! let metrics = Arc::new(Metrics::new());
//! let manager = SessionManager::new(addr, config).with_metrics(metrics.clone());
//! // ... drive the manager ...
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::MatchOutcome;

/// Metrics collector for discovery operations
///
/// Thread-safe counters, shareable across devices.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Discovery frames handed to `on_advertisement`
    pub advertisements_received: AtomicU64,
    /// Frames dropped because a filter or SRF failed to decode
    pub advertisements_dropped: AtomicU64,
    /// Pairs that passed every matching step
    pub matches: AtomicU64,
    pub filtered_by_service: AtomicU64,
    pub filtered_by_match_filter: AtomicU64,
    pub filtered_by_srf: AtomicU64,
    pub filtered_by_mode: AtomicU64,
    /// Solicited Publish frames produced
    pub replies_sent: AtomicU64,
    pub followups_sent: AtomicU64,
    pub followups_received: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_advertisement(&self) {
        self.advertisements_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.advertisements_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the result of one pair evaluation
    pub fn record_outcome(&self, outcome: MatchOutcome) {
        let counter = match outcome {
            MatchOutcome::Matched { .. } => &self.matches,
            MatchOutcome::ServiceMismatch => &self.filtered_by_service,
            MatchOutcome::FilterMismatch => &self.filtered_by_match_filter,
            MatchOutcome::SrfRejected => &self.filtered_by_srf,
            MatchOutcome::ModeMismatch => &self.filtered_by_mode,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reply(&self) {
        self.replies_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_followup_sent(&self) {
        self.followups_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_followup_received(&self) {
        self.followups_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            advertisements_received: self.advertisements_received.load(Ordering::Relaxed),
            advertisements_dropped: self.advertisements_dropped.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            filtered_by_service: self.filtered_by_service.load(Ordering::Relaxed),
            filtered_by_match_filter: self.filtered_by_match_filter.load(Ordering::Relaxed),
            filtered_by_srf: self.filtered_by_srf.load(Ordering::Relaxed),
            filtered_by_mode: self.filtered_by_mode.load(Ordering::Relaxed),
            replies_sent: self.replies_sent.load(Ordering::Relaxed),
            followups_sent: self.followups_sent.load(Ordering::Relaxed),
            followups_received: self.followups_received.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.advertisements_received,
            &self.advertisements_dropped,
            &self.matches,
            &self.filtered_by_service,
            &self.filtered_by_match_filter,
            &self.filtered_by_srf,
            &self.filtered_by_mode,
            &self.replies_sent,
            &self.followups_sent,
            &self.followups_received,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub advertisements_received: u64,
    pub advertisements_dropped: u64,
    pub matches: u64,
    pub filtered_by_service: u64,
    pub filtered_by_match_filter: u64,
    pub filtered_by_srf: u64,
    pub filtered_by_mode: u64,
    pub replies_sent: u64,
    pub followups_sent: u64,
    pub followups_received: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward counts to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_advertisement(&self);
    fn record_dropped(&self);
    fn record_outcome(&self, outcome: MatchOutcome);
    fn record_reply(&self);
    fn record_followup_sent(&self);
    fn record_followup_received(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_advertisement(&self) {}
    fn record_dropped(&self) {}
    fn record_outcome(&self, _: MatchOutcome) {}
    fn record_reply(&self) {}
    fn record_followup_sent(&self) {}
    fn record_followup_received(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_advertisement(&self) {
        Metrics::record_advertisement(self);
    }

    fn record_dropped(&self) {
        Metrics::record_dropped(self);
    }

    fn record_outcome(&self, outcome: MatchOutcome) {
        Metrics::record_outcome(self, outcome);
    }

    fn record_reply(&self) {
        Metrics::record_reply(self);
    }

    fn record_followup_sent(&self) {
        Metrics::record_followup_sent(self);
    }

    fn record_followup_received(&self) {
        Metrics::record_followup_received(self);
    }
}
