/// Project endpoints
///
/// # Endpoints
///
/// - `POST /api/projects` - Create a project owned by the current user
/// - `GET /api/projects` - List the current user's projects

use crate::{
    app::{AppState, CurrentUser},
    error::ApiResult,
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use taskforge_shared::models::project::{CreateProject, Project};
use validator::Validate;

/// Create-project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Create a project owned by the current user
pub async fn create_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            owner_id: user.id,
        },
    )
    .await?;

    Ok(Json(project))
}

/// List all projects owned by the current user, in insertion order
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_by_owner(&state.db, user.id).await?;

    Ok(Json(projects))
}
