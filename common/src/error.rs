use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors that end a scan before any target is probed.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The operating system's interface list could not be read at all.
    #[error("failed to query network interfaces: {0}")]
    InterfaceQuery(String),
    #[error("invalid scan configuration: {0}")]
    Config(#[from] ConfigError),
}

/// An interface address that cannot be turned into a CIDR block.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BlockError {
    #[error("subnet mask {0} is not contiguous")]
    NonContiguousMask(Ipv4Addr),
    #[error("prefix length {0} is larger than 32")]
    InvalidPrefix(u8),
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PortRangeError {
    #[error("port 0 cannot be probed")]
    ZeroPort,
    #[error("port range {start}-{end} is inverted")]
    Inverted { start: u16, end: u16 },
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    #[error("concurrency cap must be at least 1")]
    ZeroConcurrency,
    #[error("concurrency cap {requested} exceeds the supported maximum of {max}")]
    ConcurrencyTooHigh { requested: usize, max: usize },
    #[error("queue capacity must be at least 1")]
    ZeroQueueCapacity,
    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,
}
