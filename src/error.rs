use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum CmsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Too many login attempts")]
    RateLimited,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CmsError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CmsError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CmsError::Validation(_) => StatusCode::BAD_REQUEST,
            CmsError::Unauthorized => StatusCode::UNAUTHORIZED,
            CmsError::NotFound(_) => StatusCode::NOT_FOUND,
            CmsError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            CmsError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            CmsError::DatabaseError(_) | CmsError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CmsError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed with internal error");
        }
        let body = match self {
            CmsError::Validation(msg) => ApiErrorBody {
                code: "VALIDATION_ERROR".to_string(),
                message: msg,
            },
            CmsError::Unauthorized => ApiErrorBody {
                code: "UNAUTHORIZED".to_string(),
                message: "Authentication required.".to_string(),
            },
            CmsError::NotFound(what) => ApiErrorBody {
                code: "NOT_FOUND".to_string(),
                message: format!("{what} not found."),
            },
            CmsError::PayloadTooLarge => ApiErrorBody {
                code: "PAYLOAD_TOO_LARGE".to_string(),
                message: "request body too large".to_string(),
            },
            CmsError::RateLimited => ApiErrorBody {
                code: "RATE_LIMITED".to_string(),
                message: "Too many attempts, try again later.".to_string(),
            },
            CmsError::DatabaseError(_) | CmsError::Json(_) => ApiErrorBody {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred.".to_string(),
            },
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
