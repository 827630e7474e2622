use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    RequestExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;
use crate::routes::AppState;
use crate::services::users;

/// Resolve the bearer token to its account and expose it to handlers as
/// `Extension<UserRecord>`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = request
        .extract_parts::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AppError::Unauthorized)?;

    let email = state.jwt.validate_token(bearer.token())?;

    let user = {
        let conn = state.db.get()?;
        users::find_by_email(&conn, &email)?.ok_or(AppError::Unauthorized)?
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
