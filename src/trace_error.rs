use std::net::Ipv4Addr;
use std::{error::Error, fmt, io};

pub type GenericError = Box<dyn Error + Send + Sync + 'static>;

pub type TraceResult<T> = std::result::Result<T, TraceError>;

/// Everything that can go wrong during a trace.
///
/// All variants except `ReverseResolution` abort the run. A probe that gets
/// no answer is not an error, see [`crate::ProbeResult::is_timeout`].
#[derive(Debug)]
pub enum TraceError {
    InvalidConfig(String),
    AddressResolution { host: String, source: Option<io::Error> },
    SocketCreation(io::Error),
    Send(io::Error),
    Receive(io::Error),
    ReverseResolution { addr: Ipv4Addr, source: Option<io::Error> },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TraceError::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
            TraceError::AddressResolution { host, .. } => write!(f, "could not resolve address {host}"),
            TraceError::SocketCreation(e) => write!(f, "could not create raw ICMP socket: {e}"),
            TraceError::Send(e) => write!(f, "could not send ICMP packet: {e}"),
            TraceError::Receive(e) => write!(f, "could not receive ICMP packet: {e}"),
            TraceError::ReverseResolution { addr, .. } => write!(f, "could not resolve hostname of {addr}"),
        }
    }
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TraceError::InvalidConfig(_) => None,
            TraceError::AddressResolution { source, .. } | TraceError::ReverseResolution { source, .. } => {
                source.as_ref().map(|e| e as &(dyn Error + 'static))
            }
            TraceError::SocketCreation(e) | TraceError::Send(e) | TraceError::Receive(e) => Some(e),
        }
    }
}

impl TraceError {
    /// Whether this error ends the trace.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TraceError::ReverseResolution { .. })
    }
}
