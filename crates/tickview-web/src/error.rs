use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tickview_core::{DashboardError, SessionState, SourceErrorKind, ValidationError};

use crate::html;

/// A failed pass, rendered as the dashboard's error page.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct PageError {
    pub state: SessionState,
    pub error: DashboardError,
}

impl PageError {
    pub fn new(state: SessionState, error: impl Into<DashboardError>) -> Self {
        Self {
            state,
            error: error.into(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.error);
        (status, Html(html::render_error(&self.state, &self.error.to_string()))).into_response()
    }
}

/// A failed pass on the JSON endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::Dashboard(error.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Dashboard(error) = &self;
        let status = status_for(error);
        let body = Json(ErrorBody {
            code: status.as_u16(),
            error: error.code(),
            message: error.to_string(),
        });
        (status, body).into_response()
    }
}

pub fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
        DashboardError::Source(source) => match source.kind() {
            SourceErrorKind::NotFound => StatusCode::NOT_FOUND,
            SourceErrorKind::Unavailable | SourceErrorKind::Internal => StatusCode::BAD_GATEWAY,
        },
        DashboardError::MissingField { .. } | DashboardError::EmptyHistory { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}
