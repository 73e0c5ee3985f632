//! Domain layer - Pure business abstractions
//!
//! This layer contains no entities and no HTTP types (no SeaORM models, no Axum).
//! Only records, trait definitions and domain error types.

pub mod errors;
pub mod repositories;
pub mod rewards;

pub use errors::DomainError;
pub use repositories::*;
pub use rewards::*;
