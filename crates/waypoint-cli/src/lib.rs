//! Waypoint CLI library: argument definitions, subcommand implementations,
//! and the provider evaluation harness.

/// Command-line argument definitions.
pub mod cli;
/// Subcommand implementations.
pub mod commands;
/// Golden-question evaluation harness.
pub mod eval;
