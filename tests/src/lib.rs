//! Integration tests for the scanning pipeline.
//!
//! Interfaces and connects are simulated, so the suite runs without privileges
//! and without touching the real network.

#[cfg(test)]
mod utils;
