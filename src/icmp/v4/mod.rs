mod checksum;
mod echo_request;
mod icmp_header;
mod identifier;
mod sequence_number;
pub(crate) mod socket;
mod ttl;

pub(crate) use echo_request::EchoRequest;
pub(crate) use icmp_header::IcmpHeader;
pub(crate) use icmp_header::{ICMP_HEADER_LEN, IPV4_HEADER_LEN};
pub use identifier::Identifier;
pub use sequence_number::SequenceNumber;
pub use socket::raw_socket::{RawSocket, RawSocketFactory};
pub use socket::{SocketFactory, TSocket};
pub(crate) use socket::MIN_READ_TIMEOUT;
pub use ttl::Ttl;
