use bcrypt::{BcryptError, DEFAULT_COST, hash, verify};

/// Hash a plaintext password with bcrypt. The plaintext is never stored.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(password, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_succeeds() {
        let hashed = hash_password("Sup3rSecret").unwrap();

        assert_ne!(hashed, "Sup3rSecret");
        assert!(verify_password("Sup3rSecret", &hashed).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hashed = hash_password("Sup3rSecret").unwrap();

        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }
}
