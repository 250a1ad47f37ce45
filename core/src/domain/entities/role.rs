//! Role entity: a named grant of permissions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A role groups permissions under a name and is assigned to users
///
/// Roles are shared reference data. Users and roles reference permissions
/// by identifier; nothing is copied into the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier for the role
    pub id: Uuid,

    /// Role name surfaced in authenticated views
    pub name: String,

    /// Identifiers of the permissions this role grants, in stored order
    pub permission_ids: Vec<Uuid>,
}

impl Role {
    /// Creates a new role granting the given permissions
    pub fn new(name: String, permission_ids: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            permission_ids,
        }
    }
}
