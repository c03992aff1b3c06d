mod file;
mod memory;

pub use file::{FileLedgerStore, CHAIN_FILE};
pub use memory::InMemoryLedgerStore;
