use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Invalid payload: \"{field}\" is required and must be {requirement}.")]
    InvalidPayload {
        field: &'static str,
        requirement: &'static str,
    },

    #[error("Item not found")]
    NotFound(u64),

    #[error("Failed to read items: {0}")]
    StorageRead(String),

    #[error("Failed to write items: {0}")]
    StorageWrite(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    /// Payload error for one of the three validated fields.
    pub fn invalid_payload(field: &'static str) -> Self {
        let requirement = match field {
            "price" => "a positive number",
            _ => "a non-empty string",
        };
        ItemError::InvalidPayload { field, requirement }
    }
}

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::InvalidPayload { field, .. } => AppError::Validation {
                message: err.to_string(),
                details: Some(json!({ "field": field })),
            },
            ItemError::NotFound(_) => AppError::NotFound(err.to_string()),
            ItemError::StorageRead(_) => AppError::StorageRead(err.to_string()),
            ItemError::StorageWrite(_) => AppError::StorageWrite(err.to_string()),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
