use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing or invalid x-user-id header")]
    Unauthorized,

    #[error(transparent)]
    Domain(#[from] homeplate_shared::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        use homeplate_shared::Error;

        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::Domain(Error::User(_)) => (StatusCode::UNPROCESSABLE_ENTITY, "User"),
            AppError::Domain(Error::Validate(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Validation")
            }
            AppError::Domain(Error::NotFound) => (StatusCode::NOT_FOUND, "NotFound"),
            AppError::Domain(Error::Forbidden) => (StatusCode::FORBIDDEN, "Forbidden"),
            AppError::Domain(Error::Server(_) | Error::Unknown(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalServerError")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(ErrorResponse {
                error: kind.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
