use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::contact::RelayError;
use crate::db::StoreError;
use crate::response::ApiResponse;

pub const INTERNAL_MESSAGE: &str = "Internal Server Error";
pub const UPSTREAM_MESSAGE: &str = "Failed to submit to Google Sheets";
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Map to a route error; `context` is what the client sees if the store failed.
    pub fn into_api(self, context: &'static str) -> ApiError {
        match self {
            CatalogError::NotFound(entity) => ApiError::NotFound(format!("{} not found", entity)),
            CatalogError::Store(source) => ApiError::Repository { context, source },
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("upstream returned status {status}")]
    Upstream { status: u16 },

    #[error("upstream rejected submission: {message}")]
    Rejected { message: String, payload: Value },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::MissingFields(_) => ApiError::Validation(MISSING_FIELDS_MESSAGE.to_string()),
            RelayError::Upstream { status, .. } => ApiError::Upstream { status },
            RelayError::Rejected { message, payload } => ApiError::Rejected { message, payload },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Repository { .. } | ApiError::Rejected { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }

        let body = match self {
            ApiError::NotFound(message) | ApiError::Validation(message) => ApiResponse::failure(message.as_str()),
            ApiError::Repository { context, .. } => ApiResponse::failure(*context),
            ApiError::Upstream { .. } => ApiResponse::failure(UPSTREAM_MESSAGE),
            ApiError::Rejected { message, payload } => {
                ApiResponse::failure_with_data(message.as_str(), payload.clone())
            }
            ApiError::Internal(_) => ApiResponse::failure(INTERNAL_MESSAGE),
        };

        HttpResponse::build(status).json(body)
    }
}
