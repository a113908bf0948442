//! Compartmental tuberculosis transmission simulator.

/// REST API over simulation results.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Trajectory and parameter export.
pub mod io;
pub mod report;
/// Simulation engine, rates, and output types.
pub mod sim;
