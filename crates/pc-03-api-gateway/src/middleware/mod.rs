//! Middleware for the API Gateway.
//!
//! Layer order: Request → CORS → Trace → Timeout → BodyLimit → Handler

pub mod cors;

pub use cors::create_cors_layer;
