//! # Local Network Discovery
//!
//! Turns the host's interface list into the IPv4 blocks that will be scanned.
//!
//! Every IPv4 address assigned to an interface yields one [`NetworkBlock`], unless
//! the address is a loopback address. An address whose mask does not describe a
//! CIDR block is skipped with a warning; the remaining interfaces are still
//! enumerated.

use std::net::Ipv4Addr;
use std::vec;

use pnet::datalink::NetworkInterface;
use tracing::warn;

use netsweep_common::error::ScanError;
use netsweep_common::network::range::NetworkBlock;
use netsweep_common::utils::interface::NetworkInterfaceExtension;

/// Where the interface list comes from.
pub trait InterfaceSource: Send + Sync {
    /// Fails only when the list itself cannot be obtained.
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, ScanError>;
}

/// Result of querying an [`InterfaceSource`].
pub struct Discovery {
    /// All interfaces reported, including the ones without scannable addresses.
    pub interface_count: usize,
    pub blocks: NetworkBlocks,
}

/// Queries `source` once and returns a lazy stream of its scannable blocks.
pub fn discover_networks<S>(source: &S) -> Result<Discovery, ScanError>
where
    S: InterfaceSource + ?Sized,
{
    let interfaces: Vec<NetworkInterface> = source.interfaces()?;
    let interface_count = interfaces.len();

    let addresses: Vec<InterfaceAddresses> = interfaces
        .into_iter()
        .map(|interface| {
            let parts: Vec<(Ipv4Addr, Ipv4Addr)> = interface
                .get_scannable_ipv4_nets()
                .iter()
                .map(|net| (net.ip(), net.mask()))
                .collect();
            (interface.name, parts)
        })
        .collect();

    Ok(Discovery {
        interface_count,
        blocks: NetworkBlocks::from_addresses(addresses),
    })
}

/// An interface name with the `(address, mask)` pairs assigned to it.
pub(crate) type InterfaceAddresses = (String, Vec<(Ipv4Addr, Ipv4Addr)>);

/// Lazy, finite sequence of the blocks attached to a set of interfaces.
pub struct NetworkBlocks {
    interfaces: vec::IntoIter<InterfaceAddresses>,
    pending: Option<(String, vec::IntoIter<(Ipv4Addr, Ipv4Addr)>)>,
}

impl NetworkBlocks {
    pub(crate) fn from_addresses(addresses: Vec<InterfaceAddresses>) -> Self {
        Self {
            interfaces: addresses.into_iter(),
            pending: None,
        }
    }
}

impl Iterator for NetworkBlocks {
    type Item = NetworkBlock;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((name, parts)) = self.pending.as_mut() {
                for (ip, mask) in parts.by_ref() {
                    if let Some(block) = block_from_parts(name, ip, mask) {
                        return Some(block);
                    }
                }
            }

            let (name, parts) = self.interfaces.next()?;
            self.pending = Some((name, parts.into_iter()));
        }
    }
}

fn block_from_parts(interface: &str, ip: Ipv4Addr, mask: Ipv4Addr) -> Option<NetworkBlock> {
    match NetworkBlock::new(ip, mask) {
        Ok(block) => Some(block),
        Err(e) => {
            warn!("Skipping {ip} on {interface}: {e}");
            None
        }
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
