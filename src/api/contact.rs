use crate::api::AppState;
use crate::api::schemas::contact::{ContactForm, ContactResponse};
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

/// Accepts a contact form submission and records it.
///
/// The body is decoded by hand so a malformed payload maps to the contact error contract
/// regardless of the request's `Content-Type`. Valid JSON of any shape gets through to validation.
///
/// # Errors
/// Returns `AppError::UnreadableBody` if the body cannot be read (e.g. it exceeds the size limit).
/// Returns `AppError::InvalidJson` if the body is not JSON.
/// Returns `AppError::Validation` if the submission fails validation.
/// Returns `AppError::Storage` if the record cannot be written.
pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse> {
    let body = body.map_err(AppError::UnreadableBody)?;
    let body: Value = serde_json::from_slice(&body).map_err(AppError::InvalidJson)?;
    let form = ContactForm::from_json(&body);

    let id = state.submission_service.submit(&form).await?;

    Ok(Json(ContactResponse::submitted(id)))
}

/// Cross-origin preflight. The permissive headers are added by the router.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
