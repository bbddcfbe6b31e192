//! Salted credential hashing.
//!
//! Passwords are stored as argon2 PHC strings (`$argon2id$v=19$...`), which
//! carry their own salt and parameters. Anything else found in the `users`
//! table is a plaintext value written by an older version of the store.

use crate::libs::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Credentials(e.to_string()))
}

/// Returns `true` when `password` matches the stored PHC string.
///
/// A stored value that does not parse as a PHC string never matches.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with("$argon2") && PasswordHash::new(stored).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_hashed_password() {
        let hashed = hash_password("admin123").unwrap();

        assert!(is_hashed(&hashed));
        assert!(verify_password("admin123", &hashed));
        assert!(!verify_password("admin124", &hashed));
    }

    #[test]
    fn plaintext_is_not_a_hash() {
        assert!(!is_hashed("admin123"));
        assert!(!is_hashed("$argon2 but not really"));
        assert!(!verify_password("admin123", "admin123"));
    }
}
