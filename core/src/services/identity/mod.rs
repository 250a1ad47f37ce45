//! Identity service
//!
//! Orchestrates registration, authentication, code-gated mutations, freeze,
//! and paginated search, composing the verification gate, the credential
//! hasher, the permission aggregator, and the user repository.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::IdentityService;
pub use types::{RegisterRequest, UpdatePasswordRequest, UpdateProfileRequest};
