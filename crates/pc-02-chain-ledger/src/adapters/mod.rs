//! # Adapters
//!
//! - `storage`: in-memory and JSON-lines `LedgerStore`s
//! - `scorer`: byte-histogram `AuthenticityScorer`
//! - `lock`: exclusive data-directory lock

pub mod lock;
pub mod scorer;
pub mod storage;
