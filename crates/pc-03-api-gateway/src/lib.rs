//! # pc-03-api-gateway
//!
//! HTTP surface for PhotoChain: chain dump, transaction submission, media
//! upload and the read-side feeds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────── API GATEWAY (pc-03) ────────────────────────────┐
//! │  CORS → Trace → Timeout → BodyLimit                                         │
//! │     │                                                                      │
//! │     ├── /chain /audit ──────────────→ Ledger (read lock / re-verify)       │
//! │     ├── /transact /register ────────→ Ledger::submit (spawn_blocking)      │
//! │     ├── /upload ────────────────────→ BlobStore::put                       │
//! │     ├── /files/* ───────────────────→ ServeDir(uploads)                    │
//! │     └── /feed /explore /users/* ────→ FeedQuery over (blocks, projection)  │
//! └────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use pc_03_api_gateway::{ApiGatewayService, FsBlobStore, GatewayConfig};
//!
//! let config = GatewayConfig::default();
//! let blobs = Arc::new(FsBlobStore::new(&config.uploads.dir));
//! let service = ApiGatewayService::new(config, ledger, blobs)?;
//! service.serve(shutdown_signal()).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod service;

pub use adapters::FsBlobStore;
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::{ApiError, GatewayError};
pub use handlers::AppState;
pub use ports::{BlobStore, BlobStoreError};
pub use service::{build_router, ApiGatewayService};
