//! The Publish/Subscribe matching decision
//!
//! Both devices of a pair run the same function: the subscriber to decide
//! whether to report a discovery, the publisher to decide whether to reply.
//! Steps, in order:
//! 1. Service IDs must be equal
//! 2. Matching filters must pass in both directions
//! 3. The subscriber's SRF, if any, must accept the publisher's address
//! 4. Publish transmission mode must suit the subscriber's active/passive mode

use super::address::MacAddress;
use super::instance::{PublishInstance, PublishMode, SubscribeInstance};
use super::match_filter::{MatchFilter, MatchRule};
use super::service_id::ServiceId;
use super::srf::ServiceResponseFilter;

/// The publisher's side of a candidate pair
#[derive(Clone, Copy, Debug)]
pub struct PublishView<'a> {
    pub service_id: ServiceId,
    pub address: MacAddress,
    pub mode: PublishMode,
    pub rx_filter: Option<&'a MatchFilter>,
    pub tx_filter: Option<&'a MatchFilter>,
}

/// The subscriber's side of a candidate pair
#[derive(Clone, Copy, Debug)]
pub struct SubscribeView<'a> {
    pub service_id: ServiceId,
    pub address: MacAddress,
    pub active: bool,
    pub rx_filter: Option<&'a MatchFilter>,
    pub tx_filter: Option<&'a MatchFilter>,
    pub srf: Option<&'a ServiceResponseFilter>,
}

impl<'a> PublishView<'a> {
    pub fn of(instance: &'a PublishInstance, address: MacAddress) -> Self {
        Self {
            service_id: instance.service_id,
            address,
            mode: instance.mode,
            rx_filter: instance.rx_filter.as_ref(),
            tx_filter: instance.tx_filter.as_ref(),
        }
    }
}

impl<'a> SubscribeView<'a> {
    pub fn of(instance: &'a SubscribeInstance, address: MacAddress) -> Self {
        Self {
            service_id: instance.service_id,
            address,
            active: instance.active,
            rx_filter: instance.rx_filter.as_ref(),
            tx_filter: instance.tx_filter.as_ref(),
            srf: instance.srf.as_ref(),
        }
    }
}

/// Result of evaluating one Publish/Subscribe pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The pair matches; `reply` is set when the publisher answers the subscriber
    Matched { reply: bool },
    ServiceMismatch,
    FilterMismatch,
    SrfRejected,
    ModeMismatch,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    /// Whether the publisher produces a solicited reply (and a `Replied` event)
    pub fn replies(&self) -> bool {
        matches!(self, MatchOutcome::Matched { reply: true })
    }
}

/// Evaluate a Publish/Subscribe pair
pub fn evaluate(rule: MatchRule, publ: &PublishView<'_>, sub: &SubscribeView<'_>) -> MatchOutcome {
    if publ.service_id != sub.service_id {
        return MatchOutcome::ServiceMismatch;
    }

    let publisher_accepts = rule.evaluate(sub.tx_filter, publ.rx_filter);
    let subscriber_accepts = rule.evaluate(sub.rx_filter, publ.tx_filter);
    if !(publisher_accepts && subscriber_accepts) {
        return MatchOutcome::FilterMismatch;
    }

    if let Some(srf) = sub.srf {
        if !srf.is_relevant(&publ.address) {
            return MatchOutcome::SrfRejected;
        }
    }

    let mode_ok = if sub.active {
        publ.mode.unsolicited || publ.mode.solicited
    } else {
        publ.mode.unsolicited
    };
    if !mode_ok {
        return MatchOutcome::ModeMismatch;
    }

    MatchOutcome::Matched {
        reply: sub.active && publ.mode.solicited,
    }
}
