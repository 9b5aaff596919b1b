use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orders_types::ports::order_repository::RepoError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Store unavailable")]
    ServiceUnavailable(#[from] RepoError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, msg) = match &self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            AppError::ServiceUnavailable(e) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::SERVICE_UNAVAILABLE, "service unavailable".into())
            }
        };

        let body = serde_json::to_string(&ErrorBody { error: msg })
            .unwrap_or_else(|_| "{\"error\":\"internal serialization\"}".into());
        (code, [("content-type", "application/json")], body).into_response()
    }
}
