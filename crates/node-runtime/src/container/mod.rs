//! # Subsystem Container
//!
//! Opens every long-lived resource the node needs, in order:
//! data directory lock → chain store → scorer → ledger → blob store.
//! Dropping the container releases the lock.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, LoggingConfig, NodeConfig, StorageConfig};
pub use subsystems::SubsystemContainer;
