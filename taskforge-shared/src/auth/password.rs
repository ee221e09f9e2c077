/// Password hashing module using Argon2id
///
/// Passwords are hashed with Argon2id using fixed parameters and a fresh
/// random salt per call. Before hashing or verifying, the UTF-8 byte encoding
/// of the password is truncated to 72 bytes; a trailing partial multi-byte
/// character is dropped rather than erroring. Two passwords that agree on
/// their first 72 bytes are therefore interchangeable; `verify_password`
/// applies the same truncation so the pair stays consistent.
///
/// Neither the plaintext nor the truncated intermediate is ever stored or
/// logged.
///
/// # Example
///
/// ```
/// use taskforge_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Maximum number of password bytes fed into the hash
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Truncates a password to at most 72 UTF-8 bytes
///
/// If the 72-byte boundary falls inside a multi-byte character, the whole
/// character is dropped so the result stays valid UTF-8.
fn truncate_password(password: &str) -> &str {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password;
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !password.is_char_boundary(end) {
        end -= 1;
    }
    &password[..end]
}

/// Hashes a password using Argon2id
///
/// The cost parameters are fixed (19 MB memory, 2 iterations, 1 lane) and the
/// salt is generated fresh from the OS RNG on every call, so hashing the same
/// password twice yields different strings.
///
/// # Returns
///
/// PHC string format hash, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(truncate_password(password).as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Applies the same 72-byte truncation as `hash_password` before comparing,
/// then delegates to the scheme's constant-time verification.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` if it doesn't
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are embedded in the hash string
    let argon2 = Argon2::default();

    match argon2.verify_password(truncate_password(password).as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        assert!(verify_password("correct_password", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        assert!(!verify_password("wrong_password", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("password", "invalid_hash").is_err());
    }

    #[test]
    fn test_truncate_short_password_untouched() {
        assert_eq!(truncate_password("short"), "short");

        let exactly_72 = "a".repeat(72);
        assert_eq!(truncate_password(&exactly_72), exactly_72);
    }

    #[test]
    fn test_truncate_at_byte_limit() {
        let long = "a".repeat(100);
        assert_eq!(truncate_password(&long).len(), 72);
    }

    #[test]
    fn test_truncate_drops_partial_multibyte_char() {
        // 70 ASCII bytes followed by a 3-byte character straddling the
        // 72-byte boundary; the whole character must be dropped.
        let mut password = "a".repeat(70);
        password.push('密');
        assert_eq!(truncate_password(&password), "a".repeat(70));
    }

    #[test]
    fn test_passwords_equal_up_to_72_bytes_verify_identically() {
        let base = "x".repeat(72);
        let longer = format!("{}extra-tail-beyond-the-limit", base);

        let hash = hash_password(&base).expect("Hash should succeed");
        assert!(verify_password(&longer, &hash).expect("Verify should succeed"));

        let hash_longer = hash_password(&longer).expect("Hash should succeed");
        assert!(verify_password(&base, &hash_longer).expect("Verify should succeed"));
    }

    #[test]
    fn test_passwords_differing_within_72_bytes_do_not_verify() {
        let hash = hash_password(&"x".repeat(72)).expect("Hash should succeed");
        assert!(!verify_password(&"y".repeat(72), &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
            "very_long_password_that_is_much_longer_than_seventy_two_bytes_in_total_length_9876543210",
        ];

        for password in passwords {
            let hash = hash_password(password).expect("Hash should succeed");
            assert!(
                verify_password(password, &hash).expect("Verify should succeed"),
                "Password '{}' should verify",
                password
            );
        }
    }
}
