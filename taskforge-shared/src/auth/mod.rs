/// Authentication utilities
///
/// This module provides the credential primitives for Taskforge:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing with the 72-byte truncation contract
/// - [`token`]: Signed, expiring bearer tokens (HS256 JWT)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with fixed parameters and a fresh salt per call
/// - **Bearer Tokens**: HS256 signing, 30-minute default expiry
/// - **Constant-time Comparison**: Verification goes through the hash scheme's
///   constant-time verify, never string equality
///
/// # Example
///
/// ```no_run
/// use taskforge_shared::auth::password::{hash_password, verify_password};
/// use taskforge_shared::auth::token::{issue_token, verify_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new("alice");
/// let token = issue_token(&claims, "signing-secret")?;
/// assert_eq!(verify_token(&token, "signing-secret")?.sub, "alice");
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod token;
