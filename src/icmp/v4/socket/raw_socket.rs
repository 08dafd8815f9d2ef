use super::{SocketFactory, TSocket, MIN_READ_TIMEOUT};
use crate::icmp::v4::Ttl;
use socket2::{Domain, Protocol, Type};
use std::net::Ipv4Addr;
use std::{io, time::Duration};

/// An `AF_INET`/`SOCK_RAW`/`IPPROTO_ICMP` socket. Needs root or
/// `CAP_NET_RAW`. The socket is closed when dropped.
pub struct RawSocket {
    socket: socket2::Socket,
}

impl RawSocket {
    pub fn new() -> Result<Self, io::Error> {
        tracing::trace!("creating RawSocket");
        let socket = socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        Ok(RawSocket { socket })
    }
}

impl TSocket for RawSocket {
    fn set_ttl(&self, ttl: Ttl) -> io::Result<()> {
        self.socket.set_ttl(ttl.into())
    }

    fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize> {
        self.socket.send_to(buf, addr)
    }

    fn recv_from(&self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<(usize, Ipv4Addr)>> {
        self.socket.set_read_timeout(Some(timeout.max(MIN_READ_TIMEOUT)))?;

        // Socket2 never writes uninitialized bytes into the buffer, which makes the cast from
        // `&mut [u8]` to `&mut [MaybeUninit<u8>]` sound.
        // https://docs.rs/socket2/0.4.7/socket2/struct.Socket.html#method.recv
        //
        // On a RAW socket we get the whole IP packet.
        let received = self.socket.recv_from(unsafe {
            &mut *(std::ptr::addr_of_mut!(*buf) as *mut [std::mem::MaybeUninit<u8>])
        });
        match received {
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => Ok(None),
            Err(e) => Err(e),
            Ok((n, socket_addr)) => {
                let addr = socket_addr
                    .as_socket_ipv4()
                    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "received from a non-IPv4 address"))?;
                Ok(Some((n, *addr.ip())))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RawSocketFactory;

impl SocketFactory for RawSocketFactory {
    type Socket = RawSocket;

    fn create(&self) -> io::Result<RawSocket> {
        RawSocket::new()
    }
}
