use crate::{TraceError, TraceResult};
use std::net::{IpAddr, Ipv4Addr};

/// Forward and reverse name lookups.
pub trait Resolver {
    fn lookup_host(&self, hostname: &str) -> TraceResult<Ipv4Addr>;
    fn lookup_addr(&self, addr: Ipv4Addr) -> TraceResult<String>;
}

/// Lookups through the system resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct DnsResolver;

impl Resolver for DnsResolver {
    fn lookup_host(&self, hostname: &str) -> TraceResult<Ipv4Addr> {
        if let Ok(ip) = hostname.parse::<Ipv4Addr>() {
            return Ok(ip);
        }
        let ips = dns_lookup::lookup_host(hostname)
            .map_err(|e| TraceError::AddressResolution { host: hostname.to_owned(), source: Some(e) })?;
        ips.into_iter()
            .find_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| TraceError::AddressResolution { host: hostname.to_owned(), source: None })
    }

    fn lookup_addr(&self, addr: Ipv4Addr) -> TraceResult<String> {
        dns_lookup::lookup_addr(&IpAddr::V4(addr)).map_err(|e| TraceError::ReverseResolution { addr, source: Some(e) })
    }
}
