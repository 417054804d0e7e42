use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use loader::LoaderError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Loader(loader_err) => {
                tracing::error!(error = %loader_err, "Failed to load plays.");
                (StatusCode::SERVICE_UNAVAILABLE, loader_err.to_string())
            }
            AppError::Analytics(err @ AnalyticsError::UnknownMember(_)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            AppError::Analytics(err @ AnalyticsError::InvalidDateRange { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Analytics(err @ AnalyticsError::Overflow(_)) => {
                tracing::error!(error = %err, "Play units exceed the representable range.");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
