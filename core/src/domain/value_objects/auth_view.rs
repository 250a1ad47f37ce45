//! Authenticated identity view returned by login.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User;

/// The view of an identity returned after successful authentication
///
/// Carries identity fields, role names, and the aggregated permission names.
/// The password digest is never part of this view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User identifier
    pub id: Uuid,

    /// Login name
    pub username: String,

    /// Display name
    pub nickname: String,

    /// Contact email address
    pub email: String,

    /// Optional phone number
    pub phone_number: Option<String>,

    /// Optional avatar image reference
    pub avatar_url: Option<String>,

    /// Account creation time as milliseconds since the Unix epoch
    pub created_at_ms: i64,

    /// Whether the account has been frozen
    pub is_frozen: bool,

    /// Whether this is an admin-namespace account
    pub is_admin: bool,

    /// Names of the roles assigned to the user
    pub roles: Vec<String>,

    /// Aggregated permission names, deduplicated and order-stable
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    /// Builds the view from the loaded user and its resolved access data
    pub fn new(user: &User, roles: Vec<String>, permissions: Vec<String>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at_ms: user.created_at_millis(),
            is_frozen: user.is_frozen,
            is_admin: user.is_admin,
            roles,
            permissions,
        }
    }
}
