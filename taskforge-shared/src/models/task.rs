/// Task model and owner-scoped database operations
///
/// Tasks belong to exactly one project and are transitively owned by that
/// project's owner. Every query in this module goes through [`TaskScope`],
/// which joins to `projects` and filters on `projects.owner_id`, so a task
/// that exists under another user's project is indistinguishable from one
/// that does not exist. That collapse is deliberate: it avoids leaking the
/// existence of other users' data.
///
/// `updated_at` is bumped on every mutation; the analytics rollup relies on
/// it for "completed today / this week".
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('To Do', 'In Progress', 'Done');
/// CREATE TYPE task_priority AS ENUM ('Low', 'Medium', 'High', 'Urgent');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'To Do',
///     priority task_priority NOT NULL DEFAULT 'Medium',
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assignee_id UUID,
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `assignee_id` is a bare UUID with no foreign key; assignee existence is
/// not checked.
///
/// # Example
///
/// ```no_run
/// use taskforge_shared::models::task::{CreateTask, TaskPriority, TaskScope, TaskStatus};
/// use uuid::Uuid;
///
/// # async fn example(pool: sqlx::PgPool, owner: Uuid, project: Uuid) -> Result<(), sqlx::Error> {
/// let scope = TaskScope::new(&pool, owner);
///
/// let task = scope
///     .create(CreateTask {
///         title: "Ship it".to_string(),
///         description: None,
///         status: TaskStatus::Todo,
///         priority: TaskPriority::High,
///         project_id: project,
///         assignee_id: None,
///         due_date: None,
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Not started
    #[sqlx(rename = "To Do")]
    #[serde(rename = "To Do")]
    Todo,

    /// Being worked on
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    /// Finished
    #[sqlx(rename = "Done")]
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// All status values, in workflow order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Display/database string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Parses a status string; unrecognized values yield `None`
    ///
    /// List filters treat `None` as "no filter" rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "To Do" => Some(TaskStatus::Todo),
            "In Progress" => Some(TaskStatus::InProgress),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    #[sqlx(rename = "Low")]
    Low,

    #[sqlx(rename = "Medium")]
    Medium,

    #[sqlx(rename = "High")]
    High,

    #[sqlx(rename = "Urgent")]
    Urgent,
}

impl TaskPriority {
    /// All priority values, lowest first
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    /// Display/database string for this priority
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    /// Parses a priority string; unrecognized values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(TaskPriority::Low),
            "Medium" => Some(TaskPriority::Medium),
            "High" => Some(TaskPriority::High),
            "Urgent" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Owning project
    pub project_id: Uuid,

    /// Optional assignee (existence unchecked)
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Full-replace payload for updating a task
///
/// Every mutable field is set from this payload; there is no partial merge
/// here (single-field status/priority patches have dedicated methods).
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Optional narrowing filters for task listing
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

const TASK_COLUMNS: &str = "t.id, t.title, t.description, t.status, t.priority, \
     t.project_id, t.assignee_id, t.due_date, t.created_at, t.updated_at";

/// Owner-scoped task repository
///
/// Carries the current user's id so that every query repeats the same
/// join-then-filter rule instead of each handler re-deriving it. Methods
/// return `Ok(None)` (or `Ok(false)` for delete) both when the task is absent
/// and when it belongs to another user.
#[derive(Debug, Clone, Copy)]
pub struct TaskScope<'a> {
    pool: &'a PgPool,
    owner_id: Uuid,
}

impl<'a> TaskScope<'a> {
    /// Creates a scope for the given owner
    pub fn new(pool: &'a PgPool, owner_id: Uuid) -> Self {
        Self { pool, owner_id }
    }

    /// Creates a task under one of the owner's projects
    ///
    /// Returns `Ok(None)` if the target project does not exist or is owned
    /// by another user; nothing is inserted in that case.
    pub async fn create(&self, data: CreateTask) -> Result<Option<Task>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, project_id, assignee_id, due_date)
            SELECT $1, $2, $3, $4, p.id, $6, $7
            FROM projects p
            WHERE p.id = $5 AND p.owner_id = $8
            RETURNING id, title, description, status, priority, project_id, assignee_id,
                      due_date, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.project_id)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .bind(self.owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id within the scope
    pub async fn find(&self, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.owner_id = $2
            "#
        ))
        .bind(id)
        .bind(self.owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Lists the owner's tasks, optionally narrowed by project, status, priority
    pub async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE p.owner_id = $1
              AND ($2::uuid IS NULL OR t.project_id = $2)
              AND ($3::task_status IS NULL OR t.status = $3)
              AND ($4::task_priority IS NULL OR t.priority = $4)
            ORDER BY t.created_at
            "#
        ))
        .bind(self.owner_id)
        .bind(filter.project_id)
        .bind(filter.status)
        .bind(filter.priority)
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }

    /// Replaces all mutable fields of a task
    ///
    /// The task itself and the (possibly new) target project must both be in
    /// scope; otherwise nothing is updated and `Ok(None)` is returned.
    pub async fn update(&self, id: Uuid, data: UpdateTask) -> Result<Option<Task>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET title = $3, description = $4, status = $5, priority = $6,
                project_id = $7, assignee_id = $8, due_date = $9, updated_at = NOW()
            FROM projects cur, projects dst
            WHERE t.id = $1
              AND cur.id = t.project_id AND cur.owner_id = $2
              AND dst.id = $7 AND dst.owner_id = $2
            RETURNING t.id, t.title, t.description, t.status, t.priority,
                      t.project_id, t.assignee_id, t.due_date, t.created_at, t.updated_at
            "#,
        )
        .bind(id)
        .bind(self.owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.project_id)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Updates only the status of a task
    pub async fn set_status(
        &self,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET status = $3, updated_at = NOW()
            FROM projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.owner_id = $2
            RETURNING t.id, t.title, t.description, t.status, t.priority,
                      t.project_id, t.assignee_id, t.due_date, t.created_at, t.updated_at
            "#,
        )
        .bind(id)
        .bind(self.owner_id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Updates only the priority of a task
    pub async fn set_priority(
        &self,
        id: Uuid,
        priority: TaskPriority,
    ) -> Result<Option<Task>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET priority = $3, updated_at = NOW()
            FROM projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.owner_id = $2
            RETURNING t.id, t.title, t.description, t.status, t.priority,
                      t.project_id, t.assignee_id, t.due_date, t.created_at, t.updated_at
            "#,
        )
        .bind(id)
        .bind(self.owner_id)
        .bind(priority)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task; its comments go with it via `ON DELETE CASCADE`
    ///
    /// Returns `Ok(true)` if a task was deleted, `Ok(false)` if none was in
    /// scope under that id.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks t
            USING projects p
            WHERE t.id = $1 AND p.id = t.project_id AND p.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(self.owner_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
