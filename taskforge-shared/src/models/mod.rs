/// Database models for Taskforge
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts
/// - `project`: Projects owned by a single user
/// - `task`: Tasks belonging to a project, reached only through
///   owner-scoped queries
/// - `comment`: Comments on tasks, authored by users
///
/// # Ownership rule
///
/// Tasks and comments are never queried directly by id alone. Every read and
/// write joins through `projects` and filters on `projects.owner_id`, so a
/// record that exists but belongs to another user is indistinguishable from
/// one that does not exist. The [`task::TaskScope`] type carries that rule.
///
/// # Example
///
/// ```no_run
/// use taskforge_shared::models::user::{CreateUser, User};
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         full_name: Some("Alice Doe".to_string()),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod comment;
pub mod project;
pub mod task;
pub mod user;
