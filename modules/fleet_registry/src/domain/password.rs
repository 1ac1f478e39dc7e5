//! Credential digesting for stored administrator passwords
//!
//! The `Senha` column holds a hex-encoded SHA-256 digest, never the raw
//! secret.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a raw password.
pub fn hash_password(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Checks a raw password against a stored digest.
pub fn verify_password(raw: &str, digest: &str) -> bool {
    hash_password(raw) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_hex_encoded_sha256() {
        let digest = hash_password("123456");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_accepts_the_original_and_rejects_others() {
        let digest = hash_password("123456");
        assert!(verify_password("123456", &digest));
        assert!(!verify_password("654321", &digest));
        assert!(!verify_password("123456", "123456"));
    }
}
