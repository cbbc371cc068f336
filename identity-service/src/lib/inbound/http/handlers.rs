use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::ErrorKind;
use crate::user::errors::UserError;

pub mod health_check;
pub mod login;
pub mod profile;
pub mod register;

/// Message returned for every authentication failure.
///
/// Unknown phone numbers, wrong passwords and bad tokens all read the same.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::UnprocessableEntity(err.to_string()),
            ErrorKind::Conflict => ApiError::Conflict(err.to_string()),
            ErrorKind::Auth => {
                tracing::debug!(reason = %err, "Authentication failed");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            ErrorKind::Internal => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(INTERNAL_ERROR.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::PhoneNumberError;

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let err = ApiError::from(UserError::InvalidPhoneNumber(PhoneNumberError::InvalidFormat));
        assert!(matches!(err, ApiError::UnprocessableEntity(msg) if msg.contains("phone number")));
    }

    #[test]
    fn test_conflict_maps_to_conflict() {
        let err = ApiError::from(UserError::PhoneNumberTaken);
        assert_eq!(
            err,
            ApiError::Conflict("Phone number is already in use".to_string())
        );
    }

    #[test]
    fn test_auth_failures_are_indistinguishable() {
        let not_found = ApiError::from(UserError::UserNotFound);
        let wrong_password = ApiError::from(UserError::WrongPassword);

        assert_eq!(not_found, wrong_password);
        assert_eq!(
            not_found,
            ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::from(UserError::Store("password authentication failed".to_string()));
        assert_eq!(err, ApiError::InternalServerError(INTERNAL_ERROR.to_string()));
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::Conflict("taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
