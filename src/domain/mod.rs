//! Domain layer - Core cache models and provider traits

pub mod embedding;
pub mod error;
pub mod legal_cache;

pub use error::DomainError;
