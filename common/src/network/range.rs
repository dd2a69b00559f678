use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

use pnet::ipnetwork::Ipv4Network;

use crate::error::BlockError;
use crate::network::target::HostAddress;

/// An IPv4 subnet: a base address and its mask, both kept as big-endian `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkBlock {
    base: u32,
    mask: u32,
}

impl NetworkBlock {
    /// Builds a block from an interface address and its netmask.
    ///
    /// Fails when the mask has a hole in it (e.g. `255.0.255.0`), since such a pair
    /// does not describe a CIDR block.
    pub fn new(base: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, BlockError> {
        let mask_u32: u32 = mask.into();
        let host_bits: u32 = !mask_u32;
        if host_bits & host_bits.wrapping_add(1) != 0 {
            return Err(BlockError::NonContiguousMask(mask));
        }

        Ok(Self {
            base: base.into(),
            mask: mask_u32,
        })
    }

    pub fn from_prefix(base: Ipv4Addr, prefix: u8) -> Result<Self, BlockError> {
        if prefix > 32 {
            return Err(BlockError::InvalidPrefix(prefix));
        }
        let mask: u32 = u32::MAX.checked_shl(32 - prefix as u32).unwrap_or(0);

        Ok(Self {
            base: base.into(),
            mask,
        })
    }

    pub fn base(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base)
    }

    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask)
    }

    pub fn prefix(&self) -> u8 {
        self.mask.count_ones() as u8
    }

    pub fn network(&self) -> u32 {
        self.base & self.mask
    }

    pub fn broadcast(&self) -> u32 {
        self.network() | !self.mask
    }

    /// Number of usable hosts, i.e. everything but the network and broadcast address.
    pub fn host_count(&self) -> u32 {
        (self.broadcast() - self.network()).saturating_sub(1)
    }

    /// Lazily walks the usable host range of this block.
    pub fn hosts(&self) -> HostRange {
        HostRange::new(self.network(), self.broadcast())
    }
}

impl TryFrom<Ipv4Network> for NetworkBlock {
    type Error = BlockError;

    fn try_from(net: Ipv4Network) -> Result<Self, Self::Error> {
        NetworkBlock::new(net.ip(), net.mask())
    }
}

impl fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.network()), self.prefix())
    }
}

/// Addresses from `network + 1` up to `broadcast - 1`, both inclusive.
///
/// `/31` and `/32` blocks produce nothing. The bounds are computed with checked
/// arithmetic so `0.0.0.0/32` and `255.255.255.255/32` cannot wrap around.
#[derive(Debug, Clone)]
pub struct HostRange {
    inner: RangeInclusive<u32>,
}

impl HostRange {
    fn new(network: u32, broadcast: u32) -> Self {
        #[allow(clippy::reversed_empty_ranges)]
        let inner = match (network.checked_add(1), broadcast.checked_sub(1)) {
            (Some(first), Some(last)) if first <= last => first..=last,
            _ => 1..=0,
        };
        Self { inner }
    }
}

impl Iterator for HostRange {
    type Item = HostAddress;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(HostAddress::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
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
