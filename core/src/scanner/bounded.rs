use std::net::SocketAddrV4;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

use netsweep_common::config::ScanConfig;
use netsweep_common::error::ConfigError;
use netsweep_common::network::target::{ScanResult, ScanTarget};

use super::{EventSender, ScanEvent, ScanStats};
use crate::network::tcp::{Connector, ProbeOutcome};

/// Pause before a probe that could not open a socket tries again.
const EXHAUSTION_BACKOFF: Duration = Duration::from_millis(10);
/// Attempts per target while sockets are exhausted before the target is given up.
const EXHAUSTION_ATTEMPTS: u32 = 200;

/// Spawns one probe task per target behind a counting admission gate.
///
/// A probe moves from connecting to reachable or unreachable exactly once; failed
/// probes are neither retried nor reported. The admission permit travels with the
/// task and is released when the task ends, whatever the outcome.
///
/// A probe that cannot open a socket never reached its target, so it keeps its
/// permit and tries again once other probes have released theirs.
pub struct BoundedScanner<C> {
    connector: Arc<C>,
    admission: Arc<Semaphore>,
    max_in_flight: usize,
    timeout: Duration,
}

impl<C: Connector> BoundedScanner<C> {
    pub fn new(connector: C, config: &ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            connector: Arc::new(connector),
            admission: Arc::new(Semaphore::new(config.max_in_flight)),
            max_in_flight: config.max_in_flight,
            timeout: config.timeout,
        })
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Probes targets until `targets` closes, then waits for every in-flight probe.
    ///
    /// Reachable targets are sent to `events` as they are found, in no
    /// particular order. Stops admitting targets once nobody listens on
    /// `events`. `networks` is left at zero in the returned stats.
    pub async fn run(
        &self,
        mut targets: mpsc::Receiver<ScanTarget>,
        events: EventSender,
    ) -> ScanStats {
        let reachable = Arc::new(AtomicU64::new(0));
        let exhausted = Arc::new(AtomicBool::new(false));
        let mut probed: u64 = 0;

        while let Some(target) = targets.recv().await {
            if events.is_closed() {
                warn!("Result receiver is gone; stopping the scan");
                break;
            }
            let Ok(permit) = Arc::clone(&self.admission).acquire_owned().await else {
                break;
            };

            let connector = Arc::clone(&self.connector);
            let events = events.clone();
            let reachable = Arc::clone(&reachable);
            let exhausted = Arc::clone(&exhausted);
            let timeout = self.timeout;
            probed += 1;

            tokio::spawn(async move {
                let _permit = permit;
                let addr = target.socket_addr();
                if probe(&*connector, addr, timeout, &exhausted).await == ProbeOutcome::Reachable {
                    reachable.fetch_add(1, Ordering::Relaxed);
                    let _ = events.send(ScanEvent::Reachable(ScanResult::new(target)));
                }
            });
        }

        self.drain().await;
        debug!(probed, "all probes finished");

        ScanStats {
            networks: 0,
            probed,
            reachable: reachable.load(Ordering::Relaxed),
        }
    }

    /// Holding every permit at once means no probe is still running.
    async fn drain(&self) {
        let permits = u32::try_from(self.max_in_flight).unwrap_or(u32::MAX);
        let _all = self.admission.acquire_many(permits).await;
    }
}

/// Connects to `addr`, waiting out local socket exhaustion.
///
/// `exhausted` is set on the first exhaustion of a run so the warning is logged once.
async fn probe<C>(
    connector: &C,
    addr: SocketAddrV4,
    timeout: Duration,
    exhausted: &AtomicBool,
) -> ProbeOutcome
where
    C: Connector + ?Sized,
{
    for _ in 0..EXHAUSTION_ATTEMPTS {
        match connector.connect(addr, timeout).await {
            ProbeOutcome::ResourceExhausted => {
                if !exhausted.swap(true, Ordering::Relaxed) {
                    warn!("Out of file descriptors; probes are waiting for free sockets");
                }
                tokio::time::sleep(EXHAUSTION_BACKOFF).await;
            }
            outcome => return outcome,
        }
    }
    warn!("Gave up on {addr}: no socket became available");
    ProbeOutcome::ResourceExhausted
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
