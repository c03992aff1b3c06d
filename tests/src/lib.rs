//! # PhotoChain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion: submit throughput, replay, chain audit
//! └── src/integration/  # cross-subsystem scenarios
//!     ├── scenarios.rs  # ledger + projection + feeds
//!     ├── persistence.rs# file store, restart, tamper detection
//!     └── http.rs       # full HTTP flow over a file-backed ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pc-tests
//! cargo bench -p pc-tests
//! ```

pub mod fixtures;
pub mod integration;
