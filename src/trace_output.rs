use crate::{Identifier, Ttl};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Outcome of one probe attempt. Both fields are `None` when the probe
/// timed out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProbeResult {
    pub elapsed: Option<Duration>,
    pub responder: Option<Ipv4Addr>,
}

impl ProbeResult {
    pub fn timeout() -> Self {
        ProbeResult { elapsed: None, responder: None }
    }

    pub fn response(elapsed: Duration, responder: Ipv4Addr) -> Self {
        ProbeResult { elapsed: Some(elapsed), responder: Some(responder) }
    }

    pub fn is_timeout(&self) -> bool {
        self.responder.is_none()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HopRecord {
    pub ttl: Ttl,
    pub results: Vec<ProbeResult>,
    pub reached_destination: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceOutcome {
    DestinationReached { ttl: Ttl },
    /// Every TTL up to `max_hops` was probed without an answer from the
    /// destination.
    HopLimitExhausted { max_hops: u8 },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TraceReport {
    /// The destination as given by the caller.
    pub destination: String,
    pub address: Ipv4Addr,
    pub identifier: Identifier,
    pub hops: Vec<HopRecord>,
    pub outcome: TraceOutcome,
}

impl TraceReport {
    pub fn reached_destination(&self) -> bool {
        matches!(self.outcome, TraceOutcome::DestinationReached { .. })
    }
}
