use axum::{extract::State, Json};
use yoga_model::{LoginRequest, MessageResponse, SessionInformation, SignupRequest};

use crate::error::AppResult;
use crate::routes::AppState;
use crate::services::users;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<Json<MessageResponse>> {
    body.validate()?;

    let conn = state.db.get()?;
    let user_id = users::register(&conn, &body)?;
    tracing::info!(user_id, "User registered");

    Ok(Json(MessageResponse::new("User registered successfully!")))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<SessionInformation>> {
    body.validate()?;

    let user = {
        let conn = state.db.get()?;
        users::authenticate(&conn, &body.email, &body.password)?
    };
    let token = state.jwt.generate_token(&user.email)?;
    tracing::debug!(user_id = user.id, "User logged in");

    Ok(Json(SessionInformation {
        token,
        token_type: "Bearer".to_string(),
        id: user.id,
        username: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        admin: user.admin,
    }))
}
