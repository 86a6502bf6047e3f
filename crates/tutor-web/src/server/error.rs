//! HTTP error type for the web surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors a handler can return. Provider failures are not among them: a
/// failed turn is rendered as part of the chat page.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed form input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Template failed to compile or render.
    #[error("Render error: {0}")]
    Render(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

impl From<AppError> for tutor_common::TutorError {
    fn from(err: AppError) -> Self {
        tutor_common::TutorError::Server(err.to_string())
    }
}
