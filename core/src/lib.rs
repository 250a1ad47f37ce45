//! # Gatepass Core
//!
//! Core business logic and domain layer for the Gatepass backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the identity and access core:
//! registration, credential verification, code-gated mutations, and
//! role-to-permission resolution.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
