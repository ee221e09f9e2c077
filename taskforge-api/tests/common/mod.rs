/// Common test utilities for integration tests
///
/// Provides a `TestContext` wrapping the router and a live database
/// connection, plus request helpers that drive the app through tower. The
/// whole suite needs a PostgreSQL instance; when `DATABASE_URL` is not set,
/// `TestContext::try_new` returns `None` and callers skip.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use taskforge_api::app::{build_router, AppState};
use taskforge_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    /// Users created through this context, removed again in `cleanup`
    pub user_ids: Vec<Uuid>,
}

/// A registered user plus a fresh login token
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestContext {
    /// Creates a test context against the database named by `DATABASE_URL`
    ///
    /// Returns `None` when `DATABASE_URL` is not configured so tests can
    /// skip instead of failing on machines without Postgres.
    pub async fn try_new() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;

        let db = PgPool::connect(&url).await.expect("database should be reachable");

        // Path relative to the taskforge-api crate root
        sqlx::migrate!("../taskforge-shared/migrations")
            .run(&db)
            .await
            .expect("migrations should apply");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret-at-least-32-bytes".to_string(),
                token_ttl_minutes: 30,
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext {
            db,
            app,
            user_ids: Vec::new(),
        })
    }

    /// Registers and logs in a fresh user through the API
    pub async fn create_user(&mut self, prefix: &str) -> TestUser {
        let tag = Uuid::new_v4().simple().to_string();
        let username = format!("{}-{}", prefix, &tag[..12]);
        let email = format!("{}@example.com", username);
        let password = "Sup3rSecret!pw".to_string();

        let (status, body) = self
            .request(
                "POST",
                "/api/register",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);

        let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
        self.user_ids.push(id);

        let (status, body) = self
            .login(&username, &password)
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        TestUser {
            id,
            username,
            email,
            password,
            token: body["access_token"].as_str().unwrap().to_string(),
        }
    }

    /// Sends a JSON request (or a bare one when `body` is `None`)
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Sends a form-encoded login request
    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let form = format!(
            "username={}&password={}",
            urlencode(username),
            urlencode(password)
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    /// Removes every user created through this context; projects, tasks,
    /// and comments cascade with them
    pub async fn cleanup(&self) {
        for id in &self.user_ids {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.db)
                .await
                .expect("cleanup should succeed");
        }
    }
}

/// Minimal percent-encoding for form values used in tests
fn urlencode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
