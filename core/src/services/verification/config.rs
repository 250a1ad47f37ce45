//! Configuration for the verification code gate

/// Default lifetime of an issued code (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 5 * 60;

/// Length of the numeric verification code
pub const CODE_LENGTH: usize = 6;

/// Configuration for the verification code gate
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Seconds before an issued code expires
    pub ttl_seconds: u64,
    /// Number of digits in a generated code
    pub code_length: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            code_length: CODE_LENGTH,
        }
    }
}
