use std::time::Duration;

use crate::error::ConfigError;
use crate::network::port::PortRange;

/// Upper bound for a single connect attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);
/// Connect attempts allowed in flight at the same time.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 20_000;
/// Slots in each hand-off queue between two stages.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
/// Largest admission pool a scanner will create.
pub const MAX_IN_FLIGHT_LIMIT: usize = 1 << 24;
/// File descriptors kept out of the admission pool for stdio, the runtime and logging.
pub const FD_RESERVE: u64 = 64;

/// Parameters of a single scan.
///
/// Passed by value into the scanner and the pipeline, so two scans in the same
/// process can run with different settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub timeout: Duration,
    pub ports: PortRange,
    pub max_in_flight: usize,
    pub queue_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ports: PortRange::default(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl ScanConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ports(mut self, ports: PortRange) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Shrinks the admission pool so that every in-flight probe can hold a socket
    /// under an open file limit of `fd_limit`. Never grows the pool.
    pub fn fit_to_fd_limit(mut self, fd_limit: u64) -> Self {
        let budget = fd_limit.saturating_sub(FD_RESERVE).max(1);
        let budget = usize::try_from(budget).unwrap_or(usize::MAX);
        self.max_in_flight = self.max_in_flight.min(budget);
        self
    }

    /// Rejects settings a scanner cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_in_flight == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.max_in_flight > MAX_IN_FLIGHT_LIMIT {
            return Err(ConfigError::ConcurrencyTooHigh {
                requested: self.max_in_flight,
                max: MAX_IN_FLIGHT_LIMIT,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
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
