//! Verification code gate implementation

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use rand::Rng;
use tracing;

use crate::errors::{AuthError, DomainError, DomainResult};

use super::config::VerificationConfig;
use super::traits::CodeStore;
use super::types::CodePurpose;

/// Issues and checks one-time codes keyed by (purpose, address)
///
/// Issuing overwrites any outstanding code for the same key, so only the
/// most recently issued code can pass a check. Checking does not consume
/// the code: it stays valid for repeated checks until it expires or is
/// overwritten.
pub struct VerificationCodeGate<C: CodeStore> {
    /// External TTL cache holding outstanding codes
    store: Arc<C>,
    /// Gate configuration
    config: VerificationConfig,
}

impl<C: CodeStore> VerificationCodeGate<C> {
    /// Create a new gate over the given store
    pub fn new(store: Arc<C>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Issue a fresh code for (purpose, address) and return it for delivery
    ///
    /// The code is uniformly random, fixed-length numeric, and stored with
    /// the configured TTL. Any prior code for the same key is invalidated
    /// by the overwrite. Collisions between consecutive codes are not
    /// specially handled.
    pub async fn issue(&self, purpose: CodePurpose, address: &str) -> DomainResult<String> {
        let code = Self::generate_code(self.config.code_length);
        let key = purpose.cache_key(address);

        self.store
            .set(&key, &code, self.config.ttl_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    purpose = purpose.as_str(),
                    address = address,
                    error = %e,
                    event = "code_store_failed",
                    "Failed to store verification code"
                );
                DomainError::Cache { message: e }
            })?;

        tracing::info!(
            purpose = purpose.as_str(),
            address = address,
            event = "code_issued",
            "Issued verification code"
        );

        Ok(code)
    }

    /// Check a candidate code against the stored one for (purpose, address)
    ///
    /// # Returns
    /// * `Ok(())` - the candidate matches the outstanding code
    /// * `Err(AuthError::CodeExpired)` - no code is stored for the key
    ///   (never issued, or the TTL elapsed)
    /// * `Err(AuthError::CodeMismatch)` - a code is stored but differs
    pub async fn verify(
        &self,
        purpose: CodePurpose,
        address: &str,
        candidate: &str,
    ) -> DomainResult<()> {
        let key = purpose.cache_key(address);

        let stored = self
            .store
            .get(&key)
            .await
            .map_err(|e| DomainError::Cache { message: e })?;

        let stored = match stored {
            Some(stored) => stored,
            None => {
                tracing::warn!(
                    purpose = purpose.as_str(),
                    address = address,
                    event = "code_expired",
                    "Verification code absent or expired"
                );
                return Err(AuthError::CodeExpired.into());
            }
        };

        if !Self::constant_time_compare(&stored, candidate) {
            tracing::warn!(
                purpose = purpose.as_str(),
                address = address,
                event = "code_mismatch",
                "Verification code mismatch"
            );
            return Err(AuthError::CodeMismatch.into());
        }

        // The code is left in the store: it remains valid until it expires
        // or a new issuance overwrites it.
        Ok(())
    }

    /// Generate a uniformly random zero-padded numeric code
    fn generate_code(length: usize) -> String {
        let bound = 10u32.pow(length as u32);
        let code: u32 = rand::thread_rng().gen_range(0..bound);
        format!("{code:0length$}")
    }

    /// Compare two codes without leaking the mismatch position
    fn constant_time_compare(a: &str, b: &str) -> bool {
        if a.len() != b.len() {
            return false;
        }
        constant_time_eq(a.as_bytes(), b.as_bytes())
    }
}
