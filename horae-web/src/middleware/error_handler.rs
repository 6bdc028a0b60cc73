use axum::response::IntoResponse;

use crate::errors::WebError;

/// Fallback handler for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("The requested resource was not found")
}
