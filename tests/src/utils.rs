use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use netsweep_common::error::ScanError;
use netsweep_common::network::target::ScanResult;
use netsweep_core::discovery::InterfaceSource;
use netsweep_core::network::tcp::{Connector, ProbeOutcome};
use netsweep_core::scanner::{EventReceiver, ScanEvent};
use pnet::datalink::{MacAddr, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

pub const IFF_UP: u32 = 1;
pub const IFF_BROADCAST: u32 = 1 << 1;
pub const IFF_LOOPBACK: u32 = 1 << 3;

pub fn ni(
    name: &str,
    index: u32,
    mac: Option<MacAddr>,
    ips: &[IpNetwork],
    flags: u32,
) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac,
        ips: ips.to_vec(),
        flags,
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

pub fn v6(s: &str, p: u8) -> IpNetwork {
    IpNetwork::V6(Ipv6Network::new(s.parse().unwrap(), p).unwrap())
}

pub fn lo() -> NetworkInterface {
    ni(
        "lo",
        1,
        Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
        &[v4(127, 0, 0, 1, 8), v6("::1", 128)],
        IFF_UP | IFF_LOOPBACK,
    )
}

/// Interface list handed out verbatim, standing in for the operating system.
pub struct StaticInterfaces(pub Vec<NetworkInterface>);

impl InterfaceSource for StaticInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, ScanError> {
        Ok(self.0.clone())
    }
}

pub struct UnreadableInterfaces;

impl InterfaceSource for UnreadableInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, ScanError> {
        Err(ScanError::InterfaceQuery("getifaddrs: operation not permitted".into()))
    }
}

/// Accepts connections only on the listed socket addresses.
pub struct ListeningConnector {
    open: HashSet<SocketAddrV4>,
}

impl ListeningConnector {
    pub fn new(open: &[SocketAddrV4]) -> Self {
        Self {
            open: open.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl Connector for ListeningConnector {
    async fn connect(&self, addr: SocketAddrV4, _timeout: Duration) -> ProbeOutcome {
        if self.open.contains(&addr) {
            ProbeOutcome::Reachable
        } else {
            ProbeOutcome::Unreachable
        }
    }
}

/// A [`ListeningConnector`] that can only hold `sockets` connects open at once,
/// like a process under a tight open file limit.
pub struct ScarceSockets {
    inner: ListeningConnector,
    sockets: usize,
    in_use: AtomicUsize,
    delay: Duration,
}

impl ScarceSockets {
    pub fn new(open: &[SocketAddrV4], sockets: usize, delay: Duration) -> Self {
        Self {
            inner: ListeningConnector::new(open),
            sockets,
            in_use: AtomicUsize::new(0),
            delay,
        }
    }
}

#[async_trait]
impl Connector for ScarceSockets {
    async fn connect(&self, addr: SocketAddrV4, timeout: Duration) -> ProbeOutcome {
        if self.in_use.fetch_add(1, Ordering::SeqCst) >= self.sockets {
            self.in_use.fetch_sub(1, Ordering::SeqCst);
            return ProbeOutcome::ResourceExhausted;
        }
        tokio::time::sleep(self.delay).await;
        let outcome = self.inner.connect(addr, timeout).await;
        self.in_use.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

pub fn socket(a: u8, b: u8, c: u8, d: u8, port: u16) -> SocketAddrV4 {
    SocketAddrV4::new(Ipv4Addr::new(a, b, c, d), port)
}

/// Drains the event channel; only valid once every sender is gone.
pub async fn collect_events(mut rx: EventReceiver) -> Vec<ScanEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

pub fn reachable(events: &[ScanEvent]) -> HashSet<ScanResult> {
    events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::Reachable(result) => Some(*result),
            _ => None,
        })
        .collect()
}
