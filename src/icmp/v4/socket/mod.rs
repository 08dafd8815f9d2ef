use super::Ttl;
use std::net::Ipv4Addr;
use std::{io, time::Duration};

pub(crate) mod raw_socket;

/// Shortest read timeout a socket can honor. Read timeouts have microsecond
/// resolution and a zero timeout means "block forever".
pub(crate) const MIN_READ_TIMEOUT: Duration = Duration::from_micros(1);

/// A socket used for exactly one probe attempt.
pub trait TSocket {
    fn set_ttl(&self, ttl: Ttl) -> io::Result<()>;
    fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize>;
    /// Reads one IPv4 datagram (IP header included). Returns `Ok(None)` when
    /// nothing arrived within `timeout`.
    fn recv_from(&self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<(usize, Ipv4Addr)>>;
}

pub trait SocketFactory {
    type Socket: TSocket;
    fn create(&self) -> io::Result<Self::Socket>;
}
