//! Password hashing utilities

use bcrypt::{hash, verify};
use tracing::warn;

/// bcrypt only reads this many bytes of input; anything past it is ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Whether bcrypt would see every byte of `password`.
pub fn fits_bcrypt(password: &str) -> bool {
    password.len() <= MAX_PASSWORD_BYTES
}

/// Hash a password using bcrypt with the given work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a bcrypt digest.
///
/// A mismatch is `false`, and so is a digest bcrypt cannot parse.
/// Input longer than [`MAX_PASSWORD_BYTES`] never matches, so a password
/// cannot be satisfied by any string that merely shares its first 72 bytes.
pub fn verify_password(password: &str, digest: &str) -> bool {
    if !fits_bcrypt(password) {
        return false;
    }
    match verify(password, digest) {
        Ok(valid) => valid,
        Err(e) => {
            warn!("Stored password digest could not be verified: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same", TEST_COST).unwrap();
        let b = hash_password("same", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn digest_is_not_the_plaintext() {
        let hashed = hash_password("plaintext", TEST_COST).unwrap();
        assert!(!hashed.contains("plaintext"));
        assert!(hashed.starts_with("$2"));
    }

    #[test]
    fn malformed_digest_is_a_mismatch() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn overlong_input_does_not_match_its_prefix() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let hashed = hash_password(&prefix, TEST_COST).unwrap();

        assert!(verify_password(&prefix, &hashed));
        assert!(!verify_password(&format!("{}-anything", prefix), &hashed));
    }

    #[test]
    fn byte_limit_counts_bytes_not_chars() {
        assert!(fits_bcrypt(&"a".repeat(72)));
        assert!(!fits_bcrypt(&"a".repeat(73)));
        // 36 two-byte chars fill the limit exactly
        assert!(fits_bcrypt(&"é".repeat(36)));
        assert!(!fits_bcrypt(&"é".repeat(37)));
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(hash_password("pw", 3).is_err());
    }
}
