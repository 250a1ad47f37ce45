//! Permission entity: the unit of access surfaced to callers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single permission
///
/// `code` is the unique machine identifier; only `name` appears in
/// aggregated views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique identifier for the permission
    pub id: Uuid,

    /// Unique machine-readable code
    pub code: String,

    /// Human-readable name surfaced in aggregated views
    pub name: String,
}

impl Permission {
    /// Creates a new permission
    pub fn new(code: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            name,
        }
    }
}
