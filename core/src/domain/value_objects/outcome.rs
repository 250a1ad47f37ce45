//! Outcome type for the soft-failing write paths.

use serde::{Deserialize, Serialize};

/// Terminal outcome of a guarded write (register, password/profile update)
///
/// Storage failures on these paths are logged and reduced to `Failure`
/// instead of propagating; domain rejections still surface as errors.
/// Neither outcome is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Success,
    Failure,
}

impl WriteOutcome {
    /// Whether the write was persisted
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success)
    }
}
