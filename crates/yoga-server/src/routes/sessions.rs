use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use yoga_model::{Session, SessionRequest};

use crate::error::{parse_id, AppError, AppResult};
use crate::models::UserRecord;
use crate::routes::AppState;
use crate::services::sessions;

fn require_admin(user: &UserRecord) -> AppResult<()> {
    if !user.admin {
        tracing::warn!(user_id = user.id, "Non-admin attempted a session mutation");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Session>>> {
    let conn = state.db.get()?;
    Ok(Json(sessions::find_all(&conn)?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Session>> {
    let id = parse_id(&id)?;
    let conn = state.db.get()?;
    let session = sessions::get_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Session not found".into()))?;
    Ok(Json(session))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Json(body): Json<SessionRequest>,
) -> AppResult<Json<Session>> {
    require_admin(&user)?;
    let conn = state.db.get()?;
    Ok(Json(sessions::create(&conn, &body)?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(id): Path<String>,
    Json(body): Json<SessionRequest>,
) -> AppResult<Json<Session>> {
    let id = parse_id(&id)?;
    require_admin(&user)?;
    let conn = state.db.get()?;
    Ok(Json(sessions::update(&conn, id, &body)?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    require_admin(&user)?;
    let conn = state.db.get()?;
    sessions::delete(&conn, id)?;
    Ok(StatusCode::OK)
}

pub async fn participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    let user_id = parse_id(&user_id)?;
    let conn = state.db.get()?;
    sessions::participate(&conn, id, user_id)?;
    Ok(StatusCode::OK)
}

pub async fn no_longer_participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    let user_id = parse_id(&user_id)?;
    let conn = state.db.get()?;
    sessions::no_longer_participate(&conn, id, user_id)?;
    Ok(StatusCode::OK)
}
