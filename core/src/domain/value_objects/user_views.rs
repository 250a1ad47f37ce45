//! Digest-free user projections for lookup and search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User;

/// Compact identity view: who the user is and what they may do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
    /// Names of the roles assigned to the user
    pub roles: Vec<String>,
    /// Aggregated permission names, deduplicated and order-stable
    pub permissions: Vec<String>,
}

impl UserSummary {
    pub fn new(user: &User, roles: Vec<String>, permissions: Vec<String>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            roles,
            permissions,
        }
    }
}

/// Full profile view of a single user, without the password digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub is_frozen: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            avatar_url: user.avatar_url.clone(),
            is_frozen: user.is_frozen,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// One row of a paginated user search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListItem {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub is_frozen: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserListItem {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            avatar_url: user.avatar_url.clone(),
            is_frozen: user.is_frozen,
            created_at: user.created_at,
        }
    }
}

/// A page of search results together with the pre-pagination match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<UserListItem>,
    /// Total number of users matching the filters, before pagination
    pub total_count: u64,
}
