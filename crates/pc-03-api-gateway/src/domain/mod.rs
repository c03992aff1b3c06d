//! Domain types for the gateway: configuration, errors and wire bodies.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CorsConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig, UploadConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use types::*;
