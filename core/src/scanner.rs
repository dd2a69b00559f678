//! The scanning half of the pipeline.
//!
//! [`BoundedScanner`] probes a stream of targets while never holding more than a
//! fixed number of connect attempts in flight. [`Pipeline`] wires it behind the
//! interface enumerator and the two expansion stages.
//!
//! Progress is announced through an unbounded [`EventSender`] instead of being
//! returned, since the scan keeps going whatever a single probe reports.

use netsweep_common::network::range::NetworkBlock;
use netsweep_common::network::target::ScanResult;
use tokio::sync::mpsc;

mod bounded;
mod pipeline;

pub use bounded::BoundedScanner;
pub use pipeline::Pipeline;

/// Lifecycle announcements of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// The interface list was read; carries the number of interfaces on the host.
    InterfacesFound(usize),
    /// A network block entered the expansion stage.
    NetworkStarted(NetworkBlock),
    /// A target accepted a connection.
    Reachable(ScanResult),
}

pub type EventSender = mpsc::UnboundedSender<ScanEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ScanEvent>;

/// Counters of a finished scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub networks: u64,
    pub probed: u64,
    pub reachable: u64,
}
