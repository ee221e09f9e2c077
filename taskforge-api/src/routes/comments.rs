/// Comment endpoints
///
/// Visibility is gated through the task's project ownership. Deletion is the
/// one place existence is not hidden: an absent comment is a 404, somebody
/// else's comment is a 403.
///
/// # Endpoints
///
/// - `POST /api/comments` - Comment on an owned task
/// - `GET /api/tasks/:id/comments` - List a task's comments, newest first
/// - `DELETE /api/comments/:id` - Delete own comment

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskforge_shared::models::{comment::Comment, task::TaskScope};
use uuid::Uuid;
use validator::Validate;

/// Create-comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    /// Task to comment on
    pub task_id: Uuid,
}

/// Comment on a task owned by the current user
///
/// # Errors
///
/// - `404 Not Found`: Task absent or owned by another user
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<Json<Comment>> {
    req.validate()?;

    let comment =
        Comment::create_on_owned_task(&state.db, user.id, req.task_id, user.id, req.content)
            .await?
            .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(comment))
}

/// List a task's comments, newest first
///
/// The task itself must be in the current user's scope; an absent or foreign
/// task is a 404 before any comments are read.
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Comment>>> {
    TaskScope::new(&state.db, user.id)
        .find(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let comments = Comment::list_by_task(&state.db, task_id).await?;

    Ok(Json(comments))
}

/// Delete one of the current user's own comments
///
/// # Errors
///
/// - `404 Not Found`: Comment does not exist
/// - `403 Forbidden`: Comment exists but was written by someone else
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let comment = Comment::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.author_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the author can delete a comment".to_string(),
        ));
    }

    Comment::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
