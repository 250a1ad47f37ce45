//! Flattens a user's roles into a deduplicated, order-stable permission list

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::entities::{Permission, Role};

/// Aggregates the permissions reachable from a set of roles
pub struct PermissionAggregator;

impl PermissionAggregator {
    /// Flatten `roles` into the names of their permissions
    ///
    /// Roles are walked in the given order and each role's permission ids
    /// in their stored order; a permission id is emitted only at its first
    /// occurrence, so the result is deduplicated and order-stable for a
    /// fixed input. Ids missing from `permissions_by_id` are skipped.
    pub fn aggregate(roles: &[Role], permissions_by_id: &HashMap<Uuid, Permission>) -> Vec<String> {
        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut names = Vec::new();

        for role in roles {
            for permission_id in &role.permission_ids {
                if !seen.insert(*permission_id) {
                    continue;
                }
                if let Some(permission) = permissions_by_id.get(permission_id) {
                    names.push(permission.name.clone());
                }
            }
        }

        names
    }
}
