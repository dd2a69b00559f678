use std::ops::RangeInclusive;

use crate::error::PortRangeError;
use crate::network::target::{HostAddress, ScanTarget};

/// The well-known ports, `1..=1024`.
pub const WELL_KNOWN_PORTS: PortRange = PortRange { start: 1, end: 1024 };

/// A closed interval of TCP ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, PortRangeError> {
        if start == 0 {
            return Err(PortRangeError::ZeroPort);
        }
        if start > end {
            return Err(PortRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn iter(self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    /// Every port of this range paired with `host`.
    pub fn targets_for(self, host: HostAddress) -> impl Iterator<Item = ScanTarget> {
        self.iter().map(move |port| ScanTarget::new(host, port))
    }
}

impl Default for PortRange {
    fn default() -> Self {
        WELL_KNOWN_PORTS
    }
}

/// Lazy cross product of a host stream and a port range.
///
/// Hosts are pulled one at a time; all ports of a host are produced before the
/// next host is requested.
pub fn cross_join<I>(hosts: I, ports: PortRange) -> impl Iterator<Item = ScanTarget>
where
    I: IntoIterator<Item = HostAddress>,
{
    hosts.into_iter().flat_map(move |host| ports.targets_for(host))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
