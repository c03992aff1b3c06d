//! # Ports
//!
//! Outbound dependencies of the ledger. The ledger has no inbound trait;
//! callers use `Ledger` directly.

pub mod outbound;
