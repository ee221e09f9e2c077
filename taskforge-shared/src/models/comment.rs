/// Comment model and database operations
///
/// Comments belong to exactly one task. Visibility transits through the
/// task's project ownership; deletion is additionally gated on authorship,
/// and unlike task access the two failure modes stay distinct (absent → not
/// found, wrong author → forbidden).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content TEXT NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment on a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID (UUID v4)
    pub id: Uuid,

    /// Comment body
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Authoring user
    pub author_id: Uuid,

    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment on a task, but only if the task sits under a
    /// project owned by `owner_id`
    ///
    /// Returns `Ok(None)` without inserting anything when the task is absent
    /// or owned by another user.
    pub async fn create_on_owned_task(
        pool: &PgPool,
        owner_id: Uuid,
        task_id: Uuid,
        author_id: Uuid,
        content: String,
    ) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id, author_id)
            SELECT $1, t.id, $3
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $2 AND p.owner_id = $4
            RETURNING id, content, task_id, author_id, created_at
            "#,
        )
        .bind(content)
        .bind(task_id)
        .bind(author_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments, newest first
    ///
    /// The caller is responsible for the task ownership check; this query
    /// assumes the task id has already been resolved through a scope.
    pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, task_id, author_id, created_at
            FROM comments
            WHERE task_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    /// Finds a comment by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, task_id, author_id, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Deletes a comment by id
    ///
    /// Returns `Ok(true)` if a row was deleted. Authorship is checked by the
    /// handler so it can distinguish forbidden from not-found.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
