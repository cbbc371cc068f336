use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::handlers::ApiError;
use super::handlers::INVALID_CREDENTIALS;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that verifies the bearer token and adds the caller to request extensions.
///
/// A missing header is verified as an empty token, so every failure takes the
/// same path and produces the same response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = match req.headers().get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| {
            tracing::warn!("Authorization header is not valid ASCII");
            unauthorized()
        })?,
        None => "",
    };

    let claim = state
        .authenticator
        .validate_token(header_value, Utc::now())
        .map_err(|e| {
            match e.invalid_reason() {
                Some(reason) => tracing::warn!(%reason, "Token rejected"),
                None => tracing::warn!(error = %e, "Token rejected"),
            }
            unauthorized()
        })?;

    let user_id = UserId::from_string(&claim.subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
}
