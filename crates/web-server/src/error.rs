use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid interaction payload: {0}")]
    InvalidPayload(#[from] JsonRejection),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidPayload(rejection) => {
                tracing::warn!(error = %rejection, "Rejected interaction payload.");
                (rejection.status(), rejection.body_text())
            }
            AppError::NotFound(path) => (StatusCode::NOT_FOUND, format!("No route for {path}")),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
