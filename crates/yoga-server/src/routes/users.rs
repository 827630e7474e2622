use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use yoga_model::User;

use crate::error::{parse_id, AppError, AppResult};
use crate::models::UserRecord;
use crate::routes::AppState;
use crate::services::users;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let conn = state.db.get()?;
    let all = users::find_all(&conn)?;
    Ok(Json(all.into_iter().map(User::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let id = parse_id(&id)?;
    let conn = state.db.get()?;
    let user = users::find_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}

/// Accounts can only be deleted by their owner.
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<UserRecord>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    let conn = state.db.get()?;
    let target = users::find_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if target.email != current.email {
        tracing::warn!(user_id = current.id, target_id = id, "Refused to delete another account");
        return Err(AppError::Unauthorized);
    }

    users::delete(&conn, id)?;
    tracing::info!(user_id = id, "Account deleted");
    Ok(StatusCode::OK)
}
