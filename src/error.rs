use crate::adapters::storage::StorageError;
use crate::api::schemas::contact::ContactResponse;
use crate::domain::submission::ValidationError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid JSON in request body")]
    UnreadableBody(#[source] BytesRejection),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidJson(_) | Self::UnreadableBody(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::MethodNotAllowed => {
                tracing::debug!("Method not allowed");
                self.to_string()
            }
            Self::InvalidJson(e) => {
                tracing::debug!(error = %e, "Request body is not valid JSON");
                self.to_string()
            }
            Self::UnreadableBody(e) => {
                tracing::debug!(error = %e, "Request body could not be read");
                self.to_string()
            }
            Self::Validation(e) => {
                tracing::debug!(reason = %e, "Submission rejected");
                e.to_string()
            }
            Self::Storage(e) => {
                tracing::error!(error = %e, "Error processing contact form");
                "Internal server error".to_string()
            }
        };

        (status, Json(ContactResponse::failure(message))).into_response()
    }
}
