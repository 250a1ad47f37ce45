//! Domain-specific error types and error handling.
//!
//! Domain rejections (`AuthError`) are always surfaced to the caller so it
//! can distinguish the cause. Collaborator failures (`Storage`, `Cache`,
//! `Mail`) wrap the underlying error message; whether they propagate or are
//! reduced to a soft outcome is decided per operation in the service layer.

use thiserror::Error;

/// Identity and access rejections
///
/// These never carry a collaborator error; each one is a terminal answer
/// to the caller and is never retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Verification code expired")]
    CodeExpired,

    #[error("Verification code mismatch")]
    CodeMismatch,

    #[error("User already exists")]
    DuplicateUser,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    BadCredential,

    #[error("Invalid page number: {page_no}")]
    InvalidPage { page_no: i64 },
}

impl AuthError {
    /// Whether this rejection came from the verification-code gate
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, AuthError::CodeExpired | AuthError::CodeMismatch)
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error("Cache failure: {message}")]
    Cache { message: String },

    #[error("Mail delivery failure: {message}")]
    Mail { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
