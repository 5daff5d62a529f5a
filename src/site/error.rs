use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::model::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] liquid::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::BAD_GATEWAY,
            AppError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("storage credentials: {0}")]
    Auth(String),

    #[error("templates: {0}")]
    Template(#[from] liquid::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
