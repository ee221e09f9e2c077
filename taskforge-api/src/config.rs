/// Configuration management for the API server
///
/// Configuration is loaded from environment variables into a typed struct
/// that the rest of the application receives by injection; nothing reads the
/// environment ad hoc after startup.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8000)
/// - `JWT_SECRET`: Token signing secret; required unless
///   `TASKFORGE_ENV=development`, in which case a built-in dev key is used
///   with a loud warning
/// - `TOKEN_TTL_MINUTES`: Bearer-token lifetime (default: 30)
/// - `CORS_ORIGINS`: Comma-separated allowed origins; `*` for permissive
///   (default: *)
/// - `RUST_LOG`: Log filter (default: info)

use serde::{Deserialize, Serialize};
use std::env;

/// Signing key baked in for development runs only
const DEV_JWT_SECRET: &str = "taskforge-dev-secret-never-use-in-production";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `["*"]` means permissive
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing
    ///
    /// Generate with: `openssl rand -hex 32`
    pub jwt_secret: String,

    /// Bearer-token lifetime in minutes
    pub token_ttl_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, a numeric variable
    /// fails to parse, or `JWT_SECRET` is absent outside development.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let environment = env::var("TASKFORGE_ENV").unwrap_or_else(|_| "production".to_string());
        let jwt_secret = resolve_jwt_secret(env::var("JWT_SECRET").ok(), &environment)?;

        let token_ttl_minutes = env::var("TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_minutes,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Resolves the signing secret for the given environment
///
/// Outside development a missing secret is a hard error; the dev fallback
/// key is never handed out silently.
fn resolve_jwt_secret(explicit: Option<String>, environment: &str) -> anyhow::Result<String> {
    match explicit {
        Some(secret) => {
            if secret.len() < 32 {
                anyhow::bail!("JWT_SECRET must be at least 32 characters long");
            }
            Ok(secret)
        }
        None if environment == "development" => {
            tracing::warn!(
                "JWT_SECRET not set; using the built-in development key. \
                 Tokens signed with it are worthless outside this machine."
            );
            Ok(DEV_JWT_SECRET.to_string())
        }
        None => anyhow::bail!(
            "JWT_SECRET environment variable is required (set TASKFORGE_ENV=development \
             to use the insecure dev key)"
        ),
    }
}
