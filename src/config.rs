use crate::{TraceError, TraceResult};
use std::time::Duration;

/// Shortest accepted wait for an answer.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Decides which inbound Echo-Reply and Time-Exceeded messages count as the
/// answer to a probe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReplyMatching {
    /// Identifier and sequence number must match the probe. For Time-Exceeded
    /// messages the quoted header of the original packet is compared.
    #[default]
    ProbeIdentity,
    /// Any Echo-Reply or Time-Exceeded arriving while waiting is accepted.
    /// Unrelated ICMP traffic to this host can be attributed to a probe.
    AnyReply,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug)]
pub struct TraceConfig {
    pub max_hops: u8,
    pub pings_per_hop: u8,
    pub timeout: Duration,
    pub reply_matching: ReplyMatching,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            max_hops: 30,
            pings_per_hop: 3,
            timeout: Duration::from_secs(2),
            reply_matching: ReplyMatching::default(),
        }
    }
}

impl TraceConfig {
    pub fn validate(&self) -> TraceResult<()> {
        if self.max_hops == 0 {
            return Err(TraceError::InvalidConfig("max_hops must be at least 1".to_owned()));
        }
        if self.pings_per_hop == 0 {
            return Err(TraceError::InvalidConfig("pings_per_hop must be at least 1".to_owned()));
        }
        if self.timeout < MIN_TIMEOUT {
            return Err(TraceError::InvalidConfig(format!("timeout must be at least {MIN_TIMEOUT:?}")));
        }
        Ok(())
    }
}
