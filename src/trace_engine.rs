use crate::hop_prober::HopProber;
use crate::icmp::v4::SocketFactory;
use crate::{
    DnsResolver, Identifier, RawSocketFactory, Resolver, TraceConfig, TraceObserver, TraceOutcome, TraceReport,
    TraceResult, Ttl,
};

/// Runs traces with one fixed ICMP identifier.
#[allow(clippy::module_name_repetitions)]
pub struct TraceEngine<F, R> {
    config: TraceConfig,
    factory: F,
    resolver: R,
    identifier: Identifier,
}

/// A `TraceEngine` on raw sockets and the system resolver.
pub fn create(config: TraceConfig) -> TraceEngine<RawSocketFactory, DnsResolver> {
    TraceEngine::new(config, RawSocketFactory, DnsResolver)
}

impl<F, R> TraceEngine<F, R>
where
    F: SocketFactory,
    R: Resolver,
{
    /// Draws a random identifier for all probes sent by this engine.
    pub fn new(config: TraceConfig, factory: F, resolver: R) -> Self {
        Self::with_identifier(config, factory, resolver, Identifier::random())
    }

    pub fn with_identifier(config: TraceConfig, factory: F, resolver: R, identifier: Identifier) -> Self {
        TraceEngine { config, factory, resolver, identifier }
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    /// Traces the route to `destination`, a hostname or dotted IPv4 address.
    ///
    /// Nothing is sent if the configuration is invalid or the destination
    /// does not resolve. Running out of hops is not an error, see
    /// [`TraceOutcome::HopLimitExhausted`].
    pub fn run<O>(&self, destination: &str, observer: &mut O) -> TraceResult<TraceReport>
    where
        O: TraceObserver + ?Sized,
    {
        self.config.validate()?;
        let address = self.resolver.lookup_host(destination)?;
        tracing::debug!("tracing {destination} ({address}) with identifier {}", self.identifier);
        observer.on_trace_start(destination, address, self.config.max_hops);

        let prober = HopProber::new(&self.factory, &self.config, self.identifier, address);
        let mut hops = Vec::new();
        let mut outcome = TraceOutcome::HopLimitExhausted { max_hops: self.config.max_hops };
        for ttl in Ttl::up_to(self.config.max_hops) {
            let hop = prober.probe_hop(ttl, observer)?;
            let reached_destination = hop.reached_destination;
            hops.push(hop);
            if reached_destination {
                outcome = TraceOutcome::DestinationReached { ttl };
                break;
            }
        }
        if let TraceOutcome::HopLimitExhausted { max_hops } = outcome {
            tracing::info!("{destination} not reached within {max_hops} hops");
        }

        let report =
            TraceReport { destination: destination.to_owned(), address, identifier: self.identifier, hops, outcome };
        observer.on_trace_complete(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icmp::v4::socket::tests::{router, NetworkMock, OnCreate, OnReceive, OnSend};
    use crate::resolver::tests::ResolverMock;
    use crate::{HopPrinter, TraceError};
    use std::net::Ipv4Addr;
    use std::time::Duration;

    const DESTINATION: Ipv4Addr = Ipv4Addr::new(203, 0, 113, 9);
    const HOST: &str = "dest.example.net";

    fn config(max_hops: u8, pings_per_hop: u8) -> TraceConfig {
        TraceConfig { max_hops, pings_per_hop, timeout: Duration::from_millis(200), ..TraceConfig::default() }
    }

    fn engine(network: &NetworkMock, config: TraceConfig) -> TraceEngine<NetworkMock, ResolverMock> {
        let resolver = ResolverMock::new().with_host(HOST, DESTINATION);
        TraceEngine::with_identifier(config, network.clone(), resolver, Identifier(0x5151))
    }

    fn printed(printer: HopPrinter<Vec<u8>, ResolverMock>) -> Vec<String> {
        String::from_utf8(printer.into_inner()).unwrap().lines().map(str::to_owned).collect()
    }

    #[test]
    fn silent_destination_exhausts_hop_limit() {
        let network = NetworkMock::new(DESTINATION);
        let engine = engine(&network, config(3, 2));
        let mut printer = HopPrinter::<_, ResolverMock>::new(Vec::new(), None);

        let report = engine.run(HOST, &mut printer).unwrap();

        assert_eq!(TraceOutcome::HopLimitExhausted { max_hops: 3 }, report.outcome);
        assert_eq!(3, report.hops.len());
        assert!(report.hops.iter().all(|hop| hop.results.len() == 2 && hop.results.iter().all(|r| r.is_timeout())));
        let lines = printed(printer);
        assert_eq!(
            vec![
                "traceroute to dest.example.net (203.0.113.9), 3 hops max",
                " 1  * * ",
                " 2  * * ",
                " 3  * * ",
                "Destination not reached within 3 hops.",
                "Trace complete.",
            ],
            lines
        );
    }

    #[test]
    fn destination_at_hop_five_ends_the_trace() {
        let network = NetworkMock::new(DESTINATION).with_routers(1..=4).with_destination_at(5);
        let engine = engine(&network, config(30, 3));
        let mut printer = HopPrinter::<_, ResolverMock>::new(Vec::new(), None);

        let report = engine.run(HOST, &mut printer).unwrap();

        assert_eq!(TraceOutcome::DestinationReached { ttl: Ttl(5) }, report.outcome);
        assert!(report.reached_destination());
        assert_eq!(5, report.hops.len());
        let last = report.hops.last().unwrap();
        assert!(last.reached_destination);
        assert_eq!(1, last.results.len());
        assert_eq!(Some(DESTINATION), last.results[0].responder);

        let lines = printed(printer);
        assert_eq!(7, lines.len());
        assert!(lines[5].starts_with(" 5  203.0.113.9 "));
        assert!(!lines.iter().any(|line| line.starts_with(" 6")));
        assert_eq!("Trace complete.", lines[6]);
    }

    #[test]
    fn intermediate_router_does_not_end_the_trace() {
        let network = NetworkMock::new(DESTINATION).with_router(3).with_destination_at(5);
        let engine = engine(&network, config(30, 1));

        let report = engine.run(HOST, &mut ()).unwrap();

        let hop3 = &report.hops[2];
        assert_eq!(Ttl(3), hop3.ttl);
        assert_eq!(Some(router(3)), hop3.results[0].responder);
        assert!(hop3.results[0].elapsed.is_some());
        assert!(!hop3.reached_destination);
        assert_eq!(Ttl(4), report.hops[3].ttl);
    }

    #[test]
    fn ttls_increase_from_one_without_gaps() {
        let network = NetworkMock::new(DESTINATION).with_routers(1..=6).with_destination_at(7);
        let engine = engine(&network, config(30, 2));

        let report = engine.run(HOST, &mut ()).unwrap();

        let ttls: Vec<u8> = report.hops.iter().map(|hop| hop.ttl.0).collect();
        assert_eq!((1..=7).collect::<Vec<u8>>(), ttls);
        assert_eq!(vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7], network.sent_ttls());
    }

    #[test]
    fn unresolvable_destination_sends_nothing() {
        let network = NetworkMock::new(DESTINATION);
        let engine = engine(&network, config(3, 2));
        let mut printer = HopPrinter::<_, ResolverMock>::new(Vec::new(), None);

        let result = engine.run("unknown.example.net", &mut printer);

        assert!(matches!(result, Err(TraceError::AddressResolution { .. })));
        assert_eq!(0, network.sockets_created());
        assert!(printed(printer).is_empty());
    }

    #[test]
    fn failed_reverse_lookup_shows_address_and_trace_continues() {
        let network = NetworkMock::new(DESTINATION).with_router(1).with_destination_at(2);
        let engine = engine(&network, config(30, 1));
        let reverse = ResolverMock::new().with_hostname(DESTINATION, "dest.example.net");
        let mut printer = HopPrinter::new(Vec::new(), Some(reverse));

        let report = engine.run(HOST, &mut printer).unwrap();

        assert!(report.reached_destination());
        let lines = printed(printer);
        assert!(lines[1].starts_with(" 1  10.0.0.1 "));
        assert!(lines[2].starts_with(" 2  dest.example.net (203.0.113.9) "));
        assert_eq!("Trace complete.", lines[3]);
    }

    #[test]
    fn socket_creation_failure_aborts_the_run() {
        let network = NetworkMock::new(DESTINATION).on_create(OnCreate::ReturnErr);
        let engine = engine(&network, config(3, 2));

        let result = engine.run(HOST, &mut ());

        assert!(matches!(result, Err(TraceError::SocketCreation(_))));
        assert!(network.sent_ttls().is_empty());
    }

    #[test]
    fn send_failure_aborts_the_run() {
        let network = NetworkMock::new(DESTINATION).on_send(OnSend::ReturnErr);
        let engine = engine(&network, config(3, 2));

        let result = engine.run(HOST, &mut ());

        assert!(matches!(result, Err(TraceError::Send(_))));
        assert_eq!(1, network.sockets_created());
    }

    #[test]
    fn receive_failure_aborts_the_run() {
        let network = NetworkMock::new(DESTINATION).with_routers(1..=3).on_receive(OnReceive::ReturnErr);
        let engine = engine(&network, config(3, 2));

        let result = engine.run(HOST, &mut ());

        assert!(matches!(result, Err(TraceError::Receive(_))));
        assert_eq!(vec![1], network.sent_ttls());
        assert_eq!(0, network.sockets_open());
    }

    #[test]
    fn invalid_config_is_rejected_before_resolution() {
        let network = NetworkMock::new(DESTINATION);
        let resolver = ResolverMock::new().with_host(HOST, DESTINATION);
        let engine = TraceEngine::new(config(0, 2), network.clone(), resolver.clone());

        let result = engine.run(HOST, &mut ());

        assert!(matches!(result, Err(TraceError::InvalidConfig(_))));
        assert_eq!(0, resolver.forward_lookups());
        assert_eq!(0, network.sockets_created());
    }

    #[test]
    fn identifier_is_fixed_for_the_run() {
        let network = NetworkMock::new(DESTINATION).with_routers(1..=2);
        let engine = engine(&network, config(2, 2));

        let report = engine.run(HOST, &mut ()).unwrap();

        assert_eq!(Identifier(0x5151), report.identifier);
        for packet in network.sent_packets() {
            assert_eq!([0x51, 0x51], packet[4..6]);
        }
    }
}
