use axum::{
    extract::{Path, State},
    Json,
};
use yoga_model::Teacher;

use crate::error::{parse_id, AppError, AppResult};
use crate::routes::AppState;
use crate::services::teachers;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Teacher>>> {
    let conn = state.db.get()?;
    Ok(Json(teachers::find_all(&conn)?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Teacher>> {
    let id = parse_id(&id)?;
    let conn = state.db.get()?;
    let teacher = teachers::find_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound("Teacher not found".into()))?;
    Ok(Json(teacher))
}
