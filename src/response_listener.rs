use crate::icmp::v4::{EchoRequest, IcmpHeader, TSocket, ICMP_HEADER_LEN, IPV4_HEADER_LEN, MIN_READ_TIMEOUT};
use crate::{ProbeResult, ReplyMatching, TraceError, TraceResult};
use pnet_packet::icmp::IcmpTypes;
use pnet_packet::ipv4::Ipv4Packet;
use std::io;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

const RECV_BUFFER_SIZE: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerState {
    Waiting { remaining: Duration },
    GotResponse { elapsed: Duration, responder: Ipv4Addr },
    TimedOut,
}

/// Waits for the answer to one probe.
pub(crate) struct ResponseListener<'a> {
    probe: &'a EchoRequest,
    timeout: Duration,
    reply_matching: ReplyMatching,
}

impl<'a> ResponseListener<'a> {
    pub(crate) fn new(probe: &'a EchoRequest, timeout: Duration, reply_matching: ReplyMatching) -> Self {
        ResponseListener { probe, timeout, reply_matching }
    }

    /// Receives on `socket` until an answer is accepted or `timeout` has
    /// passed since the call. Unrelated packets are skipped without
    /// extending the budget.
    pub(crate) fn listen<S: TSocket>(&self, socket: &S) -> TraceResult<ProbeResult> {
        let start = Instant::now();
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let mut state = waiting_or_timed_out(self.timeout);
        loop {
            state = match state {
                ListenerState::Waiting { remaining } => self.wait(socket, &mut buf, start, remaining)?,
                ListenerState::GotResponse { elapsed, responder } => {
                    return Ok(ProbeResult::response(elapsed, responder));
                }
                ListenerState::TimedOut => return Ok(ProbeResult::timeout()),
            };
        }
    }

    fn wait<S: TSocket>(
        &self,
        socket: &S,
        buf: &mut [u8],
        start: Instant,
        remaining: Duration,
    ) -> TraceResult<ListenerState> {
        let received = match socket.recv_from(buf, remaining) {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(self.remaining_after(start)),
            Err(e) => return Err(TraceError::Receive(e)),
        };
        let Some((n, responder)) = received else {
            return Ok(ListenerState::TimedOut);
        };
        let elapsed = start.elapsed();
        if self.accepts(&buf[..n]) {
            tracing::trace!("icmpv4 received from {responder} after {elapsed:?}");
            Ok(ListenerState::GotResponse { elapsed, responder })
        } else {
            tracing::debug!("ignoring {n} byte datagram from {responder}");
            Ok(self.remaining_after(start))
        }
    }

    fn remaining_after(&self, start: Instant) -> ListenerState {
        waiting_or_timed_out(self.timeout.saturating_sub(start.elapsed()))
    }

    fn accepts(&self, datagram: &[u8]) -> bool {
        let Some(header) = IcmpHeader::decode_from_datagram(datagram) else {
            return false;
        };
        tracing::trace!(
            "icmpv4 header: type={} code={} checksum={:#06x}",
            header.icmp_type.0,
            header.code.0,
            header.checksum
        );
        let answered = if header.icmp_type == IcmpTypes::EchoReply {
            Some(header)
        } else if header.icmp_type == IcmpTypes::TimeExceeded {
            quoted_request(datagram)
        } else {
            return false;
        };
        match self.reply_matching {
            ReplyMatching::AnyReply => true,
            ReplyMatching::ProbeIdentity => answered.is_some_and(|answered| {
                answered.identifier == self.probe.identifier && answered.sequence_number == self.probe.sequence_number
            }),
        }
    }
}

fn waiting_or_timed_out(remaining: Duration) -> ListenerState {
    if remaining < MIN_READ_TIMEOUT {
        ListenerState::TimedOut
    } else {
        ListenerState::Waiting { remaining }
    }
}

/// The header of the Echo Request quoted in a Time-Exceeded message.
fn quoted_request(datagram: &[u8]) -> Option<IcmpHeader> {
    let original = datagram.get(IPV4_HEADER_LEN + ICMP_HEADER_LEN..)?;
    let header_length = usize::from(Ipv4Packet::new(original)?.get_header_length()) * 4;
    let header = IcmpHeader::decode(original.get(header_length..)?)?;
    (header.icmp_type == IcmpTypes::EchoRequest).then_some(header)
}
