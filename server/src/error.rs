use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pantry_core::{ReconcileError, StoreError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Reconcile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(_) | AppError::NotFound(_) => self.to_string(),
            AppError::Storage(_) | AppError::Reconcile(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(json!({ "success": false, "error": self.public_message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status() {
        assert_eq!(
            AppError::BadRequest("ingredients are required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("recipe".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::backend("locked")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_hide_storage_details() {
        let err = AppError::from(ReconcileError::Aborted {
            ingredient: "sal".to_string(),
            source: StoreError::backend("error returned from database: (code: 5) database is locked"),
        });
        assert_eq!(err.public_message(), "internal server error");
        assert!(err.to_string().contains("database is locked"));

        let err = AppError::BadRequest("ingredients are required".into());
        assert_eq!(err.public_message(), "ingredients are required");
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(AppError::NotFound("recipe".into()).to_string(), "recipe not found");
    }
}
