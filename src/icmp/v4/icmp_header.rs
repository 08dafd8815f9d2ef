use super::{Identifier, SequenceNumber};
use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::icmp::{IcmpCode, IcmpType};

/// Offset of the ICMP header inside a datagram read from a raw socket.
///
/// This is the size of an IPv4 header without options. Replies whose IP
/// header carries options are decoded at the wrong offset and end up being
/// ignored by the listener.
pub(crate) const IPV4_HEADER_LEN: usize = 20;

pub(crate) const ICMP_HEADER_LEN: usize = 8;

/// The fixed 8 byte ICMP header.
///
/// For message types other than echo request/reply the identifier and
/// sequence fields hold whatever the "rest of header" word contains.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct IcmpHeader {
    pub icmp_type: IcmpType,
    pub code: IcmpCode,
    pub checksum: u16,
    pub identifier: Identifier,
    pub sequence_number: SequenceNumber,
}

impl IcmpHeader {
    /// Decodes the header at the start of `icmp`.
    pub(crate) fn decode(icmp: &[u8]) -> Option<IcmpHeader> {
        let packet = EchoReplyPacket::new(icmp.get(..ICMP_HEADER_LEN)?)?;
        Some(IcmpHeader {
            icmp_type: packet.get_icmp_type(),
            code: packet.get_icmp_code(),
            checksum: packet.get_checksum(),
            identifier: packet.get_identifier().into(),
            sequence_number: packet.get_sequence_number().into(),
        })
    }

    /// Decodes the ICMP header of an IPv4 datagram, see [`IPV4_HEADER_LEN`].
    pub(crate) fn decode_from_datagram(datagram: &[u8]) -> Option<IcmpHeader> {
        Self::decode(datagram.get(IPV4_HEADER_LEN..)?)
    }
}
