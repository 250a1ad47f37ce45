//! Request types for the identity service operations

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ProfileChanges;

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub nickname: String,
    /// Code previously issued for the register purpose and this email
    pub code: String,
}

/// Password update request
///
/// `email` is the address the verification code was issued for. It is the
/// address supplied with the request, not necessarily the account's own
/// stored email; code ownership is checked against it, never cross-checked
/// against the target account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub email: String,
    pub code: String,
    /// The new plaintext password
    pub password: String,
}

/// Profile update request with set-if-present fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub code: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    /// The partial changes carried by this request
    pub fn changes(&self) -> ProfileChanges {
        ProfileChanges {
            nickname: self.nickname.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}
