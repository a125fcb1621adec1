use bcrypt::{hash, verify, DEFAULT_COST};

use crate::core::error::{AppError, Result};

pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("rahasia123").unwrap();
        assert_ne!(hashed, "rahasia123");
        assert!(verify_password("rahasia123", &hashed).unwrap());
        assert!(!verify_password("salah12345", &hashed).unwrap());
    }
}
