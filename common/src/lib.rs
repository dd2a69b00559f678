//! Shared model for `netsweep`.
//!
//! Everything a scan passes between its stages lives here: network blocks and the
//! host ranges they expand into, ports and scan targets, the scan configuration and
//! the error types the other crates propagate.

pub mod config;
pub mod error;
pub mod network;
pub mod utils;
