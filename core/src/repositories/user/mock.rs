//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Permission, Role, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::{UserFilter, UserRepository};

/// Mock user repository backed by in-memory maps
///
/// `fail_writes` makes every `save` return a storage error, for exercising
/// the soft-fail write policy. Reads are never failed by the flag.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    roles: Arc<RwLock<HashMap<Uuid, Role>>>,
    permissions: Arc<RwLock<HashMap<Uuid, Permission>>>,
    fail_writes: AtomicBool,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            roles: Arc::new(RwLock::new(HashMap::new())),
            permissions: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent `save` calls fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a role for relation lookups
    pub async fn insert_role(&self, role: Role) {
        self.roles.write().await.insert(role.id, role);
    }

    /// Seed a permission for relation lookups
    pub async fn insert_permission(&self, permission: Permission) {
        self.permissions.write().await.insert(permission.id, permission);
    }

    /// Seed a user directly, bypassing the uniqueness check
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == username && u.is_admin == is_admin)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "simulated write failure".to_string(),
            });
        }

        let mut users = self.users.write().await;

        // Uniqueness constraint: one username per admin namespace.
        if users.values().any(|u| {
            u.id != user.id && u.username == user.username && u.is_admin == user.is_admin
        }) {
            return Err(DomainError::Auth(AuthError::DuplicateUser));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn load_roles(&self, ids: &[Uuid]) -> Result<Vec<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(ids.iter().filter_map(|id| roles.get(id).cloned()).collect())
    }

    async fn load_permissions(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError> {
        let permissions = self.permissions.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| permissions.get(id).cloned())
            .collect())
    }

    async fn find_page(
        &self,
        filter: &UserFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let users = self.users.read().await;

        let mut matching: Vec<User> = users.values().filter(|u| filter.matches(u)).cloned().collect();
        // HashMap iteration order is arbitrary; sort for stable pages.
        matching.sort_by(|a, b| (a.created_at, &a.username).cmp(&(b.created_at, &b.username)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok((page, total))
    }
}
