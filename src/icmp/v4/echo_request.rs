use super::checksum::checksum;
use super::{Identifier, SequenceNumber, Ttl};
use pnet_packet::icmp::echo_request::{EchoRequestPacket, MutableEchoRequestPacket};
use pnet_packet::icmp::{IcmpCode, IcmpTypes};
use pnet_packet::Packet;
use std::time::{SystemTime, UNIX_EPOCH};

const PAYLOAD_SIZE: usize = std::mem::size_of::<f64>();

/// One probe attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EchoRequest {
    pub identifier: Identifier,
    pub sequence_number: SequenceNumber,
    pub ttl: Ttl,
    /// Seconds since the UNIX epoch.
    pub send_timestamp: f64,
}

impl EchoRequest {
    pub(crate) fn new(identifier: Identifier, ttl: Ttl, send_timestamp: f64) -> Self {
        EchoRequest { identifier, sequence_number: ttl.into(), ttl, send_timestamp }
    }

    pub(crate) fn now(identifier: Identifier, ttl: Ttl) -> Self {
        let send_timestamp = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0.0, |d| d.as_secs_f64());
        Self::new(identifier, ttl, send_timestamp)
    }

    /// The ICMP message (header and timestamp payload) with a valid checksum.
    pub(crate) fn to_packet(&self) -> Option<Vec<u8>> {
        let buf = vec![0u8; EchoRequestPacket::minimum_packet_size() + PAYLOAD_SIZE];
        let mut packet = MutableEchoRequestPacket::owned(buf)?;
        packet.set_icmp_type(IcmpTypes::EchoRequest);
        packet.set_icmp_code(IcmpCode::new(0));
        packet.set_identifier(self.identifier.into());
        packet.set_sequence_number(self.sequence_number.into());
        packet.set_payload(&self.send_timestamp.to_be_bytes());

        packet.set_checksum(0_u16);
        let checksum = checksum(packet.packet());
        packet.set_checksum(checksum);
        Some(packet.packet().to_vec())
    }
}
