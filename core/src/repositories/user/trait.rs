//! User repository trait defining the interface for durable storage.
//!
//! The repository is an external collaborator: implementations own the
//! actual database access while the core only sees this contract. User,
//! role, and permission records live behind the same boundary because the
//! authenticated view is assembled from all three.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Permission, Role, User};
use crate::errors::DomainError;

/// Substring filters for the paginated user search
///
/// Each present filter matches as a contains test; multiple filters are
/// ANDed. An empty filter set matches every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

impl UserFilter {
    /// Whether the given user satisfies every present filter
    pub fn matches(&self, user: &User) -> bool {
        let contains = |field: &str, needle: &Option<String>| match needle {
            Some(n) => field.contains(n.as_str()),
            None => true,
        };
        contains(&user.username, &self.username)
            && contains(&user.nickname, &self.nickname)
            && contains(&user.email, &self.email)
    }
}

/// Repository trait for user, role, and permission persistence
///
/// Network or database failures map to `DomainError::Storage`, with one
/// exception: a username uniqueness violation at save time must surface as
/// `AuthError::DuplicateUser` so the registration race resolves the same
/// way as the up-front existence check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username within one admin namespace
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that name in the namespace
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_username(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Insert or update a user
    ///
    /// # Returns
    /// * `Ok(User)` - The persisted user
    /// * `Err(DomainError::Auth(AuthError::DuplicateUser))` - Another user
    ///   already holds this username in the same admin namespace
    /// * `Err(DomainError)` - Storage error occurred
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Load roles by identifier, preserving the requested order
    ///
    /// Unknown identifiers are skipped rather than reported.
    async fn load_roles(&self, ids: &[Uuid]) -> Result<Vec<Role>, DomainError>;

    /// Load permissions by identifier, preserving the requested order
    async fn load_permissions(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError>;

    /// Find a page of users matching the filter
    ///
    /// # Returns
    /// The page slice plus the total number of matches before pagination,
    /// so callers can compute a page count.
    async fn find_page(
        &self,
        filter: &UserFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<User>, u64), DomainError>;
}
