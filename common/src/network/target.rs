//! # Scan Target Model
//!
//! A scan target is one `(host, port)` pair. Host addresses stay plain `u32`
//! values while they travel through the pipeline and only become [`Ipv4Addr`]
//! when they are printed or handed to the socket API.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostAddress(u32);

impl HostAddress {
    pub fn to_ipv4(self) -> Ipv4Addr {
        Ipv4Addr::from(self.0)
    }
}

impl From<u32> for HostAddress {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Ipv4Addr> for HostAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.into())
    }
}

impl From<HostAddress> for Ipv4Addr {
    fn from(host: HostAddress) -> Self {
        host.to_ipv4()
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_ipv4(), f)
    }
}

/// One address/port pair to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanTarget {
    pub host: HostAddress,
    pub port: u16,
}

impl ScanTarget {
    pub fn new(host: HostAddress, port: u16) -> Self {
        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.host.to_ipv4(), self.port)
    }
}

impl From<SocketAddrV4> for ScanTarget {
    fn from(addr: SocketAddrV4) -> Self {
        Self::new(HostAddress::from(*addr.ip()), addr.port())
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A target that accepted a TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanResult {
    pub target: ScanTarget,
}

impl ScanResult {
    pub fn new(target: ScanTarget) -> Self {
        Self { target }
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.target, f)
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
