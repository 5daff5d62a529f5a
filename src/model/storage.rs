use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct StorageObject {
    pub key: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("{message}")]
    Request { message: String },
}

impl StorageError {
    pub fn request(message: impl Into<String>) -> Self {
        StorageError::Request {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
