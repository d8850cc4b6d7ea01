pub mod error;
pub mod extractor;

pub use error::DocumentError;
pub use extractor::TextExtractor;

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Pdf,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Result<Self, DocumentError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/plain" | "text/markdown" => Ok(MediaType::PlainText),
            "application/pdf" => Ok(MediaType::Pdf),
            _ => Err(DocumentError::UnsupportedMediaType(mime.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("txt") | Some("md") => Ok(MediaType::PlainText),
            Some("pdf") => Ok(MediaType::Pdf),
            _ => Err(DocumentError::UnsupportedMediaType(path.display().to_string())),
        }
    }
}

/// An uploaded document, owned by the caller for the duration of extraction
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl Document {
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Self {
        Self { bytes, media_type }
    }

    pub async fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let media_type = MediaType::from_path(path)?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { bytes, media_type })
    }
}
