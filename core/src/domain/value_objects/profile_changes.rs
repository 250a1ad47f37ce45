//! Partial profile update payload.

use serde::{Deserialize, Serialize};

/// Field-by-field profile changes
///
/// Each field follows a set-if-present rule: `None` leaves the stored value
/// unchanged, it never clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChanges {
    /// New display name, if supplied
    pub nickname: Option<String>,

    /// New avatar reference, if supplied
    pub avatar_url: Option<String>,
}
