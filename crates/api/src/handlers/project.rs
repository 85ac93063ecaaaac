//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::project::{Project, ProjectPayload};
use folio_db::repositories::ProjectRepo;
use folio_db::with_retry;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProjectPayload>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let input = payload.validate()?;
    let project = with_retry(|| ProjectRepo::create(&state.pool, &input)).await?;
    tracing::info!(project_id = project.id, title = %project.title, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = with_retry(|| ProjectRepo::list(&state.pool)).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = with_retry(|| ProjectRepo::find_by_id(&state.pool, id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(payload): AppJson<ProjectPayload>,
) -> AppResult<Json<MessageResponse>> {
    let input = payload.validate()?;
    let updated = with_retry(|| ProjectRepo::update(&state.pool, id, &input)).await?;
    if updated {
        Ok(Json(MessageResponse::new("Project updated successfully")))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = with_retry(|| ProjectRepo::delete(&state.pool, id)).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Project deleted successfully")))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
