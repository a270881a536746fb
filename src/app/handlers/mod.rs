//! HTTP handlers for all web routes.

pub mod comparison;
pub mod home;
pub mod predict;
pub mod visualization;

use crate::app::render;
use crate::utils::error::AppError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::warn!(category = ?self.category(), "Rejected request: {}", self);
        } else {
            tracing::error!(
                category = ?self.category(),
                severity = ?self.severity(),
                "Request failed: {}",
                self
            );
        }
        (self.status_code(), Html(render::error_page(&self))).into_response()
    }
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
