use crate::icmp::v4::{EchoRequest, SocketFactory, TSocket};
use crate::{TraceError, TraceResult};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Opens the socket for one probe attempt.
pub(crate) fn open_socket<F: SocketFactory>(factory: &F) -> TraceResult<F::Socket> {
    factory.create().map_err(TraceError::SocketCreation)
}

/// Sets the probe's TTL on `socket` and sends the probe to `destination`.
pub(crate) fn send_probe<S: TSocket>(socket: &S, request: &EchoRequest, destination: Ipv4Addr) -> TraceResult<()> {
    socket.set_ttl(request.ttl).map_err(TraceError::SocketCreation)?;

    let packet = request
        .to_packet()
        .ok_or_else(|| TraceError::Send(io::Error::new(io::ErrorKind::InvalidData, "could not create ICMP packet")))?;
    let addr: socket2::SockAddr = SocketAddr::V4(SocketAddrV4::new(destination, 0)).into();
    socket.send_to(&packet, &addr).map_err(TraceError::Send)?;
    tracing::trace!("icmpv4 sent: ttl={} sequence_number={}", request.ttl, request.sequence_number.0);
    Ok(())
}
