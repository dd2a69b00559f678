use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use netsweep_common::config::ScanConfig;
use netsweep_common::network::port::PortRange;
use netsweep_common::network::target::ScanTarget;
use netsweep_core::network::tcp::{Connector, ProbeOutcome};
use netsweep_core::scanner::{BoundedScanner, Pipeline};
use netsweep_core::stage;
use tokio::sync::mpsc;

use crate::utils::{collect_events, ni, reachable, v4, StaticInterfaces, IFF_BROADCAST, IFF_UP};

#[derive(Default)]
struct Gauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    finished: AtomicUsize,
}

/// Simulated connect that takes `delay` and succeeds only on `open_port`.
struct DelayedConnector {
    gauge: Arc<Gauge>,
    delay: Duration,
    open_port: Option<u16>,
}

#[async_trait]
impl Connector for DelayedConnector {
    async fn connect(&self, addr: SocketAddrV4, _timeout: Duration) -> ProbeOutcome {
        let now = self.gauge.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.gauge.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.gauge.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.gauge.finished.fetch_add(1, Ordering::SeqCst);
        if Some(addr.port()) == self.open_port {
            ProbeOutcome::Reachable
        } else {
            ProbeOutcome::Unreachable
        }
    }
}

fn delayed(gauge: &Arc<Gauge>, delay: Duration, open_port: Option<u16>) -> DelayedConnector {
    DelayedConnector {
        gauge: Arc::clone(gauge),
        delay,
        open_port,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scanner_respects_cap_under_load() {
    for cap in [1usize, 7, 64] {
        let gauge = Arc::new(Gauge::default());
        let config = ScanConfig::default().with_max_in_flight(cap);
        let connector = delayed(&gauge, Duration::from_millis(1), None);
        let scanner = BoundedScanner::new(connector, &config).unwrap();

        let targets: Vec<ScanTarget> = (0..600u32)
            .map(|i| ScanTarget::from(SocketAddrV4::new(Ipv4Addr::from(0x0A00_0000 + i), 443)))
            .collect();
        let (queue, _feeder) = stage::spawn_source("targets", targets, 32);
        let (tx, _rx) = mpsc::unbounded_channel();

        let stats = scanner.run(queue, tx).await;

        let peak = gauge.peak.load(Ordering::SeqCst);
        assert!(peak <= cap, "cap {cap}: saw {peak} probes in flight");
        assert_eq!(stats.probed, 600);
        assert_eq!(gauge.finished.load(Ordering::SeqCst), 600, "cap {cap}: probes left running");
        assert_eq!(gauge.in_flight.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pipeline_drains_in_flight_probes_before_returning() {
    let gauge = Arc::new(Gauge::default());
    let interfaces = vec![ni("eth0", 2, None, &[v4(10, 20, 0, 1, 24)], IFF_UP | IFF_BROADCAST)];
    let config = ScanConfig::default()
        .with_ports(PortRange::new(20, 25).unwrap())
        .with_max_in_flight(50)
        .with_queue_capacity(4);
    let pipeline = Pipeline::new(
        StaticInterfaces(interfaces),
        delayed(&gauge, Duration::from_millis(5), Some(22)),
        config,
    )
    .unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    let stats = pipeline.run(tx).await.unwrap();

    assert_eq!(stats.probed, 254 * 6);
    assert_eq!(gauge.finished.load(Ordering::SeqCst), 254 * 6);
    assert!(gauge.peak.load(Ordering::SeqCst) <= 50);

    let found = reachable(&collect_events(rx).await);
    assert_eq!(found.len(), 254);
    assert!(found.iter().all(|result| result.target.port == 22));
}

/// Four billion hosts times 1024 ports only works if nothing is materialised.
#[tokio::test]
async fn expansion_streams_instead_of_materialising() {
    let gauge = Arc::new(Gauge::default());
    let config = ScanConfig::default().with_max_in_flight(2);
    let connector = delayed(&gauge, Duration::from_millis(5), None);
    let scanner = BoundedScanner::new(connector, &config).unwrap();

    let (hosts, _feeder) = stage::spawn_source("hosts", 0..u32::MAX, 1);
    let (mut targets, _expander) = stage::spawn_flat_map("targets", hosts, 1, |host: u32| {
        PortRange::default().targets_for(host.into())
    });
    let (tx, _rx) = mpsc::unbounded_channel();

    let (limited_tx, limited_rx) = mpsc::channel(1);
    let forward = tokio::spawn(async move {
        for _ in 0..10 {
            match targets.recv().await {
                Some(target) => {
                    if limited_tx.send(target).await.is_err() {
                        break;
                    }
                }
                None => break,
            }
        }
    });

    let stats = scanner.run(limited_rx, tx).await;
    forward.await.unwrap();

    assert_eq!(stats.probed, 10);
    assert_eq!(gauge.finished.load(Ordering::SeqCst), 10);
}
