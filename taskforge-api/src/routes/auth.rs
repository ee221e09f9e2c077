/// Account endpoints
///
/// # Endpoints
///
/// - `POST /api/register` - Register a new user (JSON)
/// - `POST /api/login` - Login with form-encoded credentials, get a token
/// - `GET /api/me` - Current user's public view (authenticated)

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Form, Json};
use serde::{Deserialize, Serialize};
use taskforge_shared::{
    auth::{password, token},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (unique)
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Email address (unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

/// Login form (form-encoded, OAuth2 password-flow style)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
        }
    }
}

/// Register a new user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `409 Conflict`: Username or email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Username already registered".to_string()));
    }
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    // A concurrent duplicate slips past the checks above; the unique
    // constraints catch it and the sqlx conversion still yields a 409.
    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
            full_name: req.full_name,
        },
    )
    .await?;

    Ok(Json(user.into()))
}

/// Login and get a bearer token
///
/// Unknown user and wrong password produce the same response.
///
/// # Errors
///
/// - `401 Unauthorized`: Bad credentials
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let bad_credentials = || ApiError::Unauthorized("Incorrect username or password".to_string());

    let user = User::find_by_username(&state.db, &form.username)
        .await?
        .ok_or_else(bad_credentials)?;

    if !password::verify_password(&form.password, &user.password_hash)? {
        return Err(bad_credentials());
    }

    let claims = token::Claims::with_ttl(&user.username, state.token_ttl());
    let access_token = token::issue_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Current user's public view
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(user.into())
}
