use std::io;
use std::net::SocketAddrV4;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// How a single connect probe ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    /// Refused, unreachable or timed out. The cause is not kept.
    Unreachable,
    /// No socket could be opened locally, so the target was never contacted.
    ResourceExhausted,
}

impl From<&io::Error> for ProbeOutcome {
    fn from(err: &io::Error) -> Self {
        if is_descriptor_exhaustion(err) {
            ProbeOutcome::ResourceExhausted
        } else {
            ProbeOutcome::Unreachable
        }
    }
}

#[cfg(unix)]
fn is_descriptor_exhaustion(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EMFILE) | Some(libc::ENFILE))
}

#[cfg(not(unix))]
fn is_descriptor_exhaustion(_err: &io::Error) -> bool {
    false
}

/// Performs one connect attempt against a target.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, addr: SocketAddrV4, probe_timeout: Duration) -> ProbeOutcome;
}

/// Full TCP handshake through the operating system's socket API.
///
/// The stream is dropped, and therefore closed, as soon as the handshake succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: SocketAddrV4, probe_timeout: Duration) -> ProbeOutcome {
        match timeout(probe_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => ProbeOutcome::Reachable,
            Ok(Err(e)) => ProbeOutcome::from(&e),
            Err(_) => ProbeOutcome::Unreachable,
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
