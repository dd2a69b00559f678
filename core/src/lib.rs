//! # netsweep core
//!
//! The scanning pipeline: local networks are [`discovery`]-ed from the interface
//! list, expanded into targets by the queue [`stage`]s, and probed by the
//! [`scanner`] through a [`network::tcp`] connector.

pub mod discovery;
pub mod network;
pub mod scanner;
pub mod stage;
pub mod system;
