use crate::icmp::v4::{EchoRequest, SocketFactory};
use crate::probe_sender::{open_socket, send_probe};
use crate::response_listener::ResponseListener;
use crate::{HopRecord, Identifier, ProbeResult, TraceConfig, TraceObserver, TraceResult, Ttl};
use std::net::Ipv4Addr;

/// Probes a single TTL.
pub(crate) struct HopProber<'a, F> {
    factory: &'a F,
    config: &'a TraceConfig,
    identifier: Identifier,
    destination: Ipv4Addr,
}

impl<'a, F> HopProber<'a, F>
where
    F: SocketFactory,
{
    pub(crate) fn new(factory: &'a F, config: &'a TraceConfig, identifier: Identifier, destination: Ipv4Addr) -> Self {
        HopProber { factory, config, identifier, destination }
    }

    /// Sends up to `pings_per_hop` probes with `ttl`, one after another.
    /// Stops early once the destination itself answered.
    pub(crate) fn probe_hop<O>(&self, ttl: Ttl, observer: &mut O) -> TraceResult<HopRecord>
    where
        O: TraceObserver + ?Sized,
    {
        observer.on_hop_start(ttl);
        let mut hop =
            HopRecord { ttl, results: Vec::with_capacity(self.config.pings_per_hop.into()), reached_destination: false };
        for _ in 0..self.config.pings_per_hop {
            let result = self.probe_once(ttl)?;
            observer.on_probe_result(ttl, &result);
            hop.results.push(result);
            if result.responder == Some(self.destination) {
                hop.reached_destination = true;
                break;
            }
        }
        observer.on_hop_complete(&hop);
        Ok(hop)
    }

    // The socket lives exactly as long as one attempt.
    fn probe_once(&self, ttl: Ttl) -> TraceResult<ProbeResult> {
        let request = EchoRequest::now(self.identifier, ttl);
        let socket = open_socket(self.factory)?;
        send_probe(&socket, &request, self.destination)?;
        ResponseListener::new(&request, self.config.timeout, self.config.reply_matching).listen(&socket)
    }
}
