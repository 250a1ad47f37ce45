//! User entity representing a registered account in the Gatepass system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ProfileChanges;

/// User entity representing a registered account
///
/// Usernames are unique per admin namespace: the same string can denote two
/// distinct accounts, one with `is_admin = false` and one with
/// `is_admin = true`. Roles are shared reference data; the user carries only
/// their identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique within the account's admin namespace
    pub username: String,

    /// One-way digest of the password; the plaintext is never stored
    pub password_digest: String,

    /// Contact email address
    pub email: String,

    /// Display name
    pub nickname: String,

    /// Optional phone number
    pub phone_number: Option<String>,

    /// Optional avatar image reference
    pub avatar_url: Option<String>,

    /// Whether the account has been frozen
    ///
    /// Recorded state only; this core does not block logins for frozen
    /// accounts. Enforcement belongs to the caller.
    pub is_frozen: bool,

    /// Whether this is an admin-namespace account
    pub is_admin: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Identifiers of the roles assigned to this user, in assignment order
    pub role_ids: Vec<Uuid>,
}

impl User {
    /// Creates a new non-admin, non-frozen user with no roles
    pub fn new(
        username: String,
        password_digest: String,
        email: String,
        nickname: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_digest,
            email,
            nickname,
            phone_number: None,
            avatar_url: None,
            is_frozen: false,
            is_admin: false,
            created_at: Utc::now(),
            role_ids: Vec::new(),
        }
    }

    /// Freezes the account
    pub fn freeze(&mut self) {
        self.is_frozen = true;
    }

    /// Replaces the stored password digest
    pub fn set_password_digest(&mut self, digest: String) {
        self.password_digest = digest;
    }

    /// Applies a partial profile update
    ///
    /// Only fields present in `changes` are written; absent fields keep
    /// their current value.
    pub fn apply_profile(&mut self, changes: &ProfileChanges) {
        if let Some(nickname) = &changes.nickname {
            self.nickname = nickname.clone();
        }
        if let Some(avatar_url) = &changes.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
    }

    /// The creation time as milliseconds since the Unix epoch
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}
