/// Task endpoints
///
/// All operations run through the owner-scoped [`TaskScope`] repository: a
/// task that is absent and a task owned by another user are the same 404.
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create a task (target project must be owned)
/// - `GET /api/tasks?project_id&status&priority` - List with optional filters
/// - `GET /api/tasks/:id` - Fetch one task
/// - `PUT /api/tasks/:id` - Full replace of all mutable fields
/// - `PATCH /api/tasks/:id/status` - Status only
/// - `PATCH /api/tasks/:id/priority` - Priority only
/// - `DELETE /api/tasks/:id` - Delete (comments cascade)

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskforge_shared::models::task::{
    CreateTask, Task, TaskFilter, TaskPriority, TaskScope, TaskStatus, UpdateTask,
};
use uuid::Uuid;
use validator::Validate;

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// Task payload, shared by create and full update
///
/// Status and priority fall back to their defaults (To Do / Medium) when
/// omitted, matching the create defaults; on update the payload replaces
/// every mutable field.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskPayload {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status (default: To Do)
    #[serde(default)]
    pub status: Option<TaskStatus>,

    /// Priority (default: Medium)
    #[serde(default)]
    pub priority: Option<TaskPriority>,

    /// Target project; must be owned by the current user
    pub project_id: Uuid,

    /// Optional assignee (existence unchecked)
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// List-tasks query parameters
///
/// Status and priority arrive as raw strings; unrecognized values are
/// silently ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub project_id: Option<Uuid>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Status patch body
#[derive(Debug, Deserialize)]
pub struct StatusPatch {
    pub status: TaskStatus,
}

/// Priority patch body
#[derive(Debug, Deserialize)]
pub struct PriorityPatch {
    pub priority: TaskPriority,
}

/// Create a task under one of the current user's projects
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `404 Not Found`: Target project absent or owned by another user
pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = TaskScope::new(&state.db, user.id)
        .create(CreateTask {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or(TaskStatus::Todo),
            priority: req.priority.unwrap_or(TaskPriority::Medium),
            project_id: req.project_id,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        })
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(task))
}

/// List the current user's tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter {
        project_id: query.project_id,
        status: query.status.as_deref().and_then(TaskStatus::parse),
        priority: query.priority.as_deref().and_then(TaskPriority::parse),
    };

    let tasks = TaskScope::new(&state.db, user.id).list(filter).await?;

    Ok(Json(tasks))
}

/// Fetch one task
pub async fn get_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = TaskScope::new(&state.db, user.id)
        .find(id)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Replace all mutable fields of a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = TaskScope::new(&state.db, user.id)
        .update(
            id,
            UpdateTask {
                title: req.title,
                description: req.description,
                status: req.status.unwrap_or(TaskStatus::Todo),
                priority: req.priority.unwrap_or(TaskPriority::Medium),
                project_id: req.project_id,
                assignee_id: req.assignee_id,
                due_date: req.due_date,
            },
        )
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Update only the status of a task
pub async fn update_task_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<StatusPatch>,
) -> ApiResult<Json<Task>> {
    let task = TaskScope::new(&state.db, user.id)
        .set_status(id, patch.status)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Update only the priority of a task
pub async fn update_task_priority(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PriorityPatch>,
) -> ApiResult<Json<Task>> {
    let task = TaskScope::new(&state.db, user.id)
        .set_priority(id, patch.priority)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Delete a task; its comments cascade with it
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = TaskScope::new(&state.db, user.id).delete(id).await?;

    if !deleted {
        return Err(task_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}
