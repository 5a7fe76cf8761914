use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use compute::ComputeError;
use thiserror::Error;
use tracing::error;

use crate::helpers::html::render_error_page;
use crate::schemas::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data source error: {0}")]
    DataSource(#[from] ComputeError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::DataSource(_) => "DATA_SOURCE_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::InternalServerError(_) => "INTERNAL_ERROR",
        }
    }

    /// The same error rendered as a standalone HTML page.
    pub fn into_page(self) -> (StatusCode, Html<String>) {
        error!("Dashboard page failed: {}", self);
        (self.status(), Html(render_error_page(self.status(), &self.to_string())))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalServerError(format!("Background task failed: {err}"))
    }
}
