use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported document type: {0}")]
    UnsupportedMediaType(String),
    #[error("document is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),
    #[error("document could not be read: {0}")]
    Unreadable(String),
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        AppError::DocumentRead(err.to_string())
    }
}
