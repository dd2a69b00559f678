use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task;
use tracing::{debug, info, warn};

use netsweep_common::config::ScanConfig;
use netsweep_common::error::ScanError;
use netsweep_common::network::range::NetworkBlock;
use netsweep_common::network::target::HostAddress;

use super::{BoundedScanner, EventSender, ScanEvent, ScanStats};
use crate::discovery::{self, InterfaceSource};
use crate::network::tcp::Connector;
use crate::stage;

/// Enumerator → network expander → address/port expander → bounded scanner.
///
/// Every stage runs as its own task and hands its output to the next one through
/// a bounded queue of `queue_capacity` slots.
pub struct Pipeline<S, C> {
    source: Arc<S>,
    scanner: BoundedScanner<C>,
    config: ScanConfig,
}

impl<S: InterfaceSource + 'static, C: Connector> Pipeline<S, C> {
    pub fn new(source: S, connector: C, config: ScanConfig) -> Result<Self, ScanError> {
        let scanner = BoundedScanner::new(connector, &config)?;

        Ok(Self {
            source: Arc::new(source),
            scanner,
            config,
        })
    }

    /// Runs one complete scan.
    ///
    /// Returns once every target has been probed. Fails without probing anything
    /// when the interface list cannot be read.
    pub async fn run(&self, events: EventSender) -> Result<ScanStats, ScanError> {
        let source = Arc::clone(&self.source);
        let discovery = task::spawn_blocking(move || discovery::discover_networks(&*source))
            .await
            .map_err(|e| ScanError::InterfaceQuery(e.to_string()))??;
        if events.send(ScanEvent::InterfacesFound(discovery.interface_count)).is_err() {
            debug!("event receiver closed before the scan started");
        }

        let capacity: usize = self.config.queue_capacity;
        let ports = self.config.ports;
        let networks = Arc::new(AtomicU64::new(0));

        let (blocks, enumerator) =
            stage::spawn_source("interface enumerator", discovery.blocks, capacity);

        let network_events = events.clone();
        let network_count = Arc::clone(&networks);
        let expand_network = move |block: NetworkBlock| {
            debug!(network = %block, hosts = block.host_count(), "expanding network");
            network_count.fetch_add(1, Ordering::Relaxed);
            // A closed receiver is noticed by the scanner, which stops the run.
            let _ = network_events.send(ScanEvent::NetworkStarted(block));
            block.hosts()
        };
        let (hosts, network_expander) =
            stage::spawn_flat_map("network expander", blocks, capacity, expand_network);

        let expand_host = move |host: HostAddress| ports.targets_for(host);
        let (targets, port_expander) =
            stage::spawn_flat_map("address-port expander", hosts, capacity, expand_host);

        let mut stats: ScanStats = self.scanner.run(targets, events).await;

        for handle in [enumerator, network_expander, port_expander] {
            if let Err(e) = handle.await {
                warn!("Pipeline stage ended abnormally: {e}");
            }
        }

        stats.networks = networks.load(Ordering::Relaxed);
        info!(
            networks = stats.networks,
            probed = stats.probed,
            reachable = stats.reachable,
            "scan complete"
        );

        Ok(stats)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
