//! Handlers for the `/users` resource (contact form submissions).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::user::{User, UserPayload};
use folio_db::repositories::UserRepo;
use folio_db::{with_retry, DbPool};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::MessageResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// Reject `email` if it belongs to a user other than `except`.
async fn ensure_email_available(pool: &DbPool, email: &str, except: Option<DbId>) -> AppResult<()> {
    let existing = with_retry(|| UserRepo::find_by_email(pool, email)).await?;
    match existing {
        Some(user) if Some(user.id) != except => Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        ))),
        _ => Ok(()),
    }
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = with_retry(|| UserRepo::list(&state.pool)).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<User>> {
    let user = with_retry(|| UserRepo::find_by_id(&state.pool, id))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UserPayload>,
) -> AppResult<(StatusCode, Json<User>)> {
    let input = payload.validate()?;
    ensure_email_available(&state.pool, &input.email, None).await?;

    let user = with_retry(|| UserRepo::create(&state.pool, &input)).await?;
    tracing::info!(user_id = user.id, "Contact submission stored");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(payload): AppJson<UserPayload>,
) -> AppResult<Json<MessageResponse>> {
    let input = payload.validate()?;
    with_retry(|| UserRepo::find_by_id(&state.pool, id))
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_email_available(&state.pool, &input.email, Some(id)).await?;

    let updated = with_retry(|| UserRepo::update(&state.pool, id, &input)).await?;
    if !updated {
        return Err(not_found(id));
    }
    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = with_retry(|| UserRepo::delete(&state.pool, id)).await?;
    if deleted {
        tracing::info!(user_id = id, "User deleted");
        Ok(Json(MessageResponse::new("User deleted successfully")))
    } else {
        Err(not_found(id))
    }
}
