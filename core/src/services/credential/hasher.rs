//! One-way password digesting

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

/// One-way transform of a plaintext secret into a comparable digest
///
/// The digest is deterministic and unsalted: the same plaintext always
/// yields the same digest, for every account. Digests are lowercase hex
/// SHA-256 and are not byte-compatible with stores written by other
/// hash functions.
pub struct CredentialHasher;

impl CredentialHasher {
    /// Digest a plaintext secret
    pub fn hash(plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }

    /// Recompute and compare against a stored digest
    pub fn matches(plaintext: &str, digest: &str) -> bool {
        let computed = Self::hash(plaintext);
        if computed.len() != digest.len() {
            return false;
        }
        constant_time_eq(computed.as_bytes(), digest.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(CredentialHasher::hash("pw1"), CredentialHasher::hash("pw1"));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = CredentialHasher::hash("pw1");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(digest, "pw1");
    }

    #[test]
    fn test_different_plaintexts_differ() {
        assert_ne!(CredentialHasher::hash("pw1"), CredentialHasher::hash("pw2"));
    }

    #[test]
    fn test_matches() {
        let digest = CredentialHasher::hash("correct-pw");
        assert!(CredentialHasher::matches("correct-pw", &digest));
        assert!(!CredentialHasher::matches("wrong-pw", &digest));
        assert!(!CredentialHasher::matches("correct-pw", "not-a-digest"));
    }
}
