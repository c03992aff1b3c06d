//! Cross-subsystem scenarios: pc-01 projection, pc-02 ledger, pc-03 gateway.

pub mod http;
pub mod persistence;
pub mod scenarios;
