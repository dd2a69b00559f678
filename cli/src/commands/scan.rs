use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use netsweep_common::config::ScanConfig;
use netsweep_common::error::ScanError;
use netsweep_core::network::tcp::TcpConnector;
use netsweep_core::scanner::{EventReceiver, Pipeline, ScanStats};
use netsweep_core::system::{self, SystemInterfaces};

use crate::terminal::print::{Printer, print};

/// Scans every local IPv4 network with the fixed scan parameters.
///
/// A failure to read the interface list is reported and ends the scan without
/// further output; it is not treated as a process failure.
pub async fn scan(printer: &Printer) -> anyhow::Result<()> {
    printer.banner("Scan local network");

    let config = scan_config(system::raise_fd_limit());
    let pipeline = Pipeline::new(SystemInterfaces, TcpConnector, config)?;
    let (tx, rx) = mpsc::unbounded_channel();
    let output = tokio::spawn(print_events(*printer, rx));

    let start_time: Instant = Instant::now();
    let outcome = pipeline.run(tx).await;

    if let Err(e) = output.await {
        warn!("Output task ended abnormally: {e}");
    }

    if let Err(e) = &outcome {
        error!("{e}");
    }
    if let Ok(stats) = &outcome {
        info!(
            "{} reachable target(s) out of {} probed across {} network(s) in {:.2}s",
            stats.reachable,
            stats.probed,
            stats.networks,
            start_time.elapsed().as_secs_f64()
        );
    }
    if let Some(line) = closing_line(printer, &outcome) {
        print(&line);
    }
    Ok(())
}

/// Default parameters with the admission pool fitted to the open file limit.
fn scan_config(fd_limit: Option<u64>) -> ScanConfig {
    let config = ScanConfig::default();
    let Some(limit) = fd_limit else {
        return config;
    };

    let fitted = config.fit_to_fd_limit(limit);
    if fitted.max_in_flight < config.max_in_flight {
        warn!(
            "Open file limit of {limit} allows {} concurrent probes instead of {}",
            fitted.max_in_flight, config.max_in_flight
        );
    }
    fitted
}

async fn print_events(printer: Printer, mut rx: EventReceiver) {
    while let Some(event) = rx.recv().await {
        printer.event(&event);
    }
}

/// "Done" closes a scan that ran to the end; a failed enumeration prints nothing.
fn closing_line(printer: &Printer, outcome: &Result<ScanStats, ScanError>) -> Option<String> {
    match outcome {
        Ok(_) => printer.banner_line("Done"),
        Err(_) => None,
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
