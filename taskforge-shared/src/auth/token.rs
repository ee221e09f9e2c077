/// Bearer-token issuance and verification
///
/// Tokens are HS256-signed JWTs carrying the username as subject and an
/// expiry timestamp. The default time-to-live is 30 minutes; callers can
/// shorten or lengthen it per token.
///
/// Verification treats every failure mode (expired, malformed, wrong
/// signature) as an ordinary `Err` value. Malformed input is an expected
/// condition, never a panic.
///
/// # Example
///
/// ```
/// use taskforge_shared::auth::token::{issue_token, verify_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "signing-secret-at-least-32-bytes!!";
/// let token = issue_token(&Claims::new("alice"), secret)?;
///
/// let claims = verify_token(&token, secret)?;
/// assert_eq!(claims.sub, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token issuer written into every claim set
const ISSUER: &str = "taskforge";

/// Default token time-to-live in minutes
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token failed validation (bad signature, malformed, wrong issuer)
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// JWT claims carried by a Taskforge bearer token
///
/// # Claims
///
/// - `sub`: Subject (username)
/// - `iss`: Issuer, always "taskforge"
/// - `iat`: Issued-at (Unix timestamp)
/// - `exp`: Expiration (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims with the default 30-minute expiry
    pub fn new(username: &str) -> Self {
        Self::with_ttl(username, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Creates claims with a custom time-to-live
    pub fn with_ttl(username: &str, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: username.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Checks whether the expiry timestamp has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs a set of claims into a token string
///
/// # Errors
///
/// Returns `TokenError::CreateError` if encoding fails
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature, the expiry, and the issuer. Any failure,
/// whether expired, malformed input, or a wrong signature, comes back as
/// an `Err`.
///
/// # Errors
///
/// - `TokenError::Expired` if the expiry timestamp has passed
/// - `TokenError::Invalid` for every other validation failure
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
