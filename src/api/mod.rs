//! HTTP surface: router, server lifecycle, error mapping, endpoints.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::api_router;
