use crate::{HopRecord, ProbeResult, Resolver, TraceOutcome, TraceReport, Ttl};
use std::io::{self, Write};
use std::net::Ipv4Addr;

/// Receives progress while a trace runs. Every callback defaults to doing
/// nothing.
#[allow(clippy::module_name_repetitions)]
pub trait TraceObserver {
    /// The destination was resolved and probing is about to start.
    fn on_trace_start(&mut self, _destination: &str, _address: Ipv4Addr, _max_hops: u8) {}
    fn on_hop_start(&mut self, _ttl: Ttl) {}
    /// Called once per probe attempt, as soon as its outcome is known.
    fn on_probe_result(&mut self, _ttl: Ttl, _result: &ProbeResult) {}
    fn on_hop_complete(&mut self, _hop: &HopRecord) {}
    fn on_trace_complete(&mut self, _report: &TraceReport) {}
}

impl TraceObserver for () {}

/// Prints one line per hop, in the classic traceroute layout:
///
/// ```text
/// traceroute to example.com (93.184.216.34), 30 hops max
///  1  192.168.1.1 1.23 ms 192.168.1.1 0.98 ms *
/// ```
pub struct HopPrinter<W, R> {
    out: W,
    resolver: Option<R>,
}

impl<W: Write, R: Resolver> HopPrinter<W, R> {
    /// With a `resolver`, responders are shown as `hostname (address)`.
    pub fn new(out: W, resolver: Option<R>) -> Self {
        HopPrinter { out, resolver }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn responder_name(&self, addr: Ipv4Addr) -> String {
        let Some(resolver) = &self.resolver else {
            return addr.to_string();
        };
        match resolver.lookup_addr(addr) {
            Ok(hostname) => format!("{hostname} ({addr})"),
            Err(e) => {
                tracing::debug!("{e}");
                addr.to_string()
            }
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.write_flushed(text) {
            tracing::warn!("could not write trace output: {e}");
        }
    }

    fn write_flushed(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write, R: Resolver> TraceObserver for HopPrinter<W, R> {
    fn on_trace_start(&mut self, destination: &str, address: Ipv4Addr, max_hops: u8) {
        self.emit(&format!("traceroute to {destination} ({address}), {max_hops} hops max\n"));
    }

    fn on_hop_start(&mut self, ttl: Ttl) {
        self.emit(&format!("{ttl:2}  "));
    }

    fn on_probe_result(&mut self, _ttl: Ttl, result: &ProbeResult) {
        let text = match (result.responder, result.elapsed) {
            (Some(responder), Some(elapsed)) => {
                let millis = elapsed.as_secs_f64() * 1000.0;
                format!("{} {millis:.2} ms ", self.responder_name(responder))
            }
            _ => "* ".to_owned(),
        };
        self.emit(&text);
    }

    fn on_hop_complete(&mut self, _hop: &HopRecord) {
        self.emit("\n");
    }

    fn on_trace_complete(&mut self, report: &TraceReport) {
        if let TraceOutcome::HopLimitExhausted { max_hops } = report.outcome {
            self.emit(&format!("Destination not reached within {max_hops} hops.\n"));
        }
        self.emit("Trace complete.\n");
    }
}
