use pnet::datalink::{self, NetworkInterface};
use tracing::{debug, warn};

use netsweep_common::error::ScanError;

use crate::discovery::InterfaceSource;

/// Reads the interface list from the operating system.
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, ScanError> {
        Ok(datalink::interfaces())
    }
}

/// Lifts the soft open file limit as close to the hard limit as allowed.
///
/// Returns the soft limit in effect afterwards, or `None` when it cannot be read.
#[cfg(unix)]
pub fn raise_fd_limit() -> Option<u64> {
    match rlimit::increase_nofile_limit(u64::MAX) {
        Ok(limit) => {
            debug!(limit, "open file limit");
            Some(limit)
        }
        Err(e) => {
            warn!("Could not raise the open file limit: {e}");
            rlimit::Resource::NOFILE.get().ok().map(|(soft, _)| soft)
        }
    }
}

#[cfg(not(unix))]
pub fn raise_fd_limit() -> Option<u64> {
    None
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
