use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health_check() -> ApiSuccess<HealthCheckResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthCheckResponseData {
            message: "everything is OK!".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResponseData {
    pub message: String,
}
