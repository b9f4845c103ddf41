use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::JsonRejection,
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Handler-level error union.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant carries the human-readable description sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// The request was refused by an extractor before the handler ran.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

/// `axum::Json` whose rejections are reported as `AppError` JSON bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(msg) => tracing::warn!("Not found: {msg}"),
            AppError::BadRequest(msg) => tracing::warn!("Bad request: {msg}"),
            AppError::Extraction(msg) => tracing::error!("Extraction error: {msg}"),
            AppError::Storage(msg) => tracing::error!("Storage error: {msg}"),
            AppError::PayloadTooLarge(msg) => tracing::warn!("Payload too large: {msg}"),
            AppError::Rejected { status, message } => {
                tracing::warn!("Request rejected ({status}): {message}")
            }
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Extraction("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Storage("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::PayloadTooLarge("x".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Rejected {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "x".into()
            }
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_body_carries_detail() {
        let response = AppError::Storage("Error saving resume: boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "detail": "Error saving resume: boom" }));
    }
}
