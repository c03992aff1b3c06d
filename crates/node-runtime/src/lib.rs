//! # Node Runtime Library
//!
//! Configuration, logging and subsystem wiring for the `photochain` binary,
//! exposed as a library for tests.

pub mod container;
pub mod logging;

pub use container::{ConfigError, NodeConfig, SubsystemContainer};
pub use logging::init_tracing;
