use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hostel_management_config::ConfigError;
use hostel_management_database::error::DatabaseError;
use hostel_management_records::{LedgerError, StoreError};
use serde_json::json;

/// Everything a handler (or `main`) can fail with. Handlers only ever
/// construct the domain-facing variants; the infrastructure ones exist so
/// `main` can use `?` all the way down.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("Access denied")]
    Forbidden,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(LedgerError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Ledger(LedgerError::Capacity(_)) => StatusCode::BAD_REQUEST,
            Self::Ledger(LedgerError::Conflict(_)) | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Ledger(LedgerError::Store(_))
            | Self::Store(_)
            | Self::Io(_)
            | Self::Config(_)
            | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };
        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
