/// Analytics endpoint
///
/// # Endpoints
///
/// - `GET /api/analytics` - Rollup of the current user's full task set,
///   computed fresh on every call

use crate::{
    app::{AppState, CurrentUser},
    error::ApiResult,
};
use axum::{extract::State, Extension, Json};
use taskforge_shared::analytics::{self, AnalyticsSummary};

/// Compute the current user's task rollup
pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<AnalyticsSummary>> {
    let summary = analytics::rollup_for_owner(&state.db, user.id).await?;

    Ok(Json(summary))
}
