//! Purpose tags for verification codes

use serde::{Deserialize, Serialize};

/// The flow a verification code belongs to
///
/// A code is single-purpose: the purpose is part of the storage key, so a
/// code issued for one flow can never satisfy a check in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Register,
    UpdatePassword,
    UpdateProfile,
}

impl CodePurpose {
    /// The stable tag used in storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Register => "register",
            CodePurpose::UpdatePassword => "update_password",
            CodePurpose::UpdateProfile => "update_profile",
        }
    }

    /// Storage key for a code bound to this purpose and address
    pub fn cache_key(&self, address: &str) -> String {
        format!("{}_{}", self.as_str(), address)
    }

    /// Subject line for the delivery mail
    pub fn mail_subject(&self) -> &'static str {
        match self {
            CodePurpose::Register => "Registration verification code",
            CodePurpose::UpdatePassword => "Password update verification code",
            CodePurpose::UpdateProfile => "Profile update verification code",
        }
    }
}
