//! ICMP traceroute.
//!
//! Sends ICMP Echo Requests with increasing TTL towards a destination and
//! reports which routers answer, and how fast. Probing is strictly
//! sequential: one raw socket per probe, one probe at a time.
//!
//! ```no_run
//! use trace_fox::{DnsResolver, HopPrinter, TraceConfig};
//!
//! let engine = trace_fox::create(TraceConfig::default());
//! let mut printer = HopPrinter::<_, DnsResolver>::new(std::io::stdout(), None);
//! let report = engine.run("example.com", &mut printer)?;
//! println!("reached: {}", report.reached_destination());
//! # Ok::<(), trace_fox::TraceError>(())
//! ```
#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub use config::{ReplyMatching, TraceConfig};
pub use icmp::v4::{Identifier, RawSocket, RawSocketFactory, SequenceNumber, SocketFactory, TSocket, Ttl};
pub use resolver::{DnsResolver, Resolver};
pub use trace_engine::{create, TraceEngine};
pub use trace_error::{GenericError, TraceError, TraceResult};
pub use trace_observer::{HopPrinter, TraceObserver};
pub use trace_output::{HopRecord, ProbeResult, TraceOutcome, TraceReport};

mod config;
mod hop_prober;
mod icmp;
mod probe_sender;
mod resolver;
mod response_listener;
mod trace_engine;
mod trace_error;
mod trace_observer;
mod trace_output;
