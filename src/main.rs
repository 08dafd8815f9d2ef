use std::process::ExitCode;
use std::time::Duration;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use trace_fox::{DnsResolver, GenericError, HopPrinter, ReplyMatching, TraceConfig};

#[derive(argh::FromArgs)]
/// trace-fox - print the route ICMP packets take to a network host
struct Args {
    #[argh(switch, short = 'r')]
    /// show the hostname of each responding router
    resolve: bool,

    #[argh(option, short = 'm', default = "30")]
    /// maximum number of hops (highest TTL) to probe
    max_hops: u8,

    #[argh(option, short = 'q', default = "3")]
    /// number of probes per hop
    queries: u8,

    #[argh(option, short = 'w', default = "2000")]
    /// time to wait for each answer, in milliseconds
    wait_ms: u64,

    #[argh(switch)]
    /// accept any echo reply or time exceeded message, even if it does not answer our probe
    any_reply: bool,

    #[argh(switch, short = 'v')]
    /// log what is sent and received to stderr
    verbose: bool,

    #[argh(positional)]
    /// destination hostname or IPv4 address
    destination: String,
}

fn main() -> Result<ExitCode, GenericError> {
    let args: Args = argh::from_env();

    let level = if args.verbose { Level::TRACE } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TraceConfig {
        max_hops: args.max_hops,
        pings_per_hop: args.queries,
        timeout: Duration::from_millis(args.wait_ms),
        reply_matching: if args.any_reply { ReplyMatching::AnyReply } else { ReplyMatching::ProbeIdentity },
    };
    let engine = trace_fox::create(config);
    let resolver = args.resolve.then_some(DnsResolver);
    let mut printer = HopPrinter::new(std::io::stdout(), resolver);

    match engine.run(&args.destination, &mut printer) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("trace-fox: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
