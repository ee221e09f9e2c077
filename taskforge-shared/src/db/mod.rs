/// Database layer
///
/// # Modules
///
/// - [`pool`]: PostgreSQL connection pool setup and health checks
/// - [`migrations`]: Migration runner backed by `sqlx::migrate!`

pub mod migrations;
pub mod pool;
