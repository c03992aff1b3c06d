//! Adapters for the gateway's outbound ports.

pub mod blob_store;

pub use blob_store::FsBlobStore;
