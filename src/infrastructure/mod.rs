//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod http_client;
pub mod legal_cache;
pub mod logging;
pub mod observability;
