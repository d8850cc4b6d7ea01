use super::error::DocumentError;
use super::{Document, MediaType};
use crate::infrastructure::documents::PagedDocumentReader;
use std::sync::Arc;

const UTF8_BOM: &str = "\u{feff}";

/// Turns an uploaded document into a single string
pub struct TextExtractor {
    paged_reader: Arc<dyn PagedDocumentReader>,
}

impl TextExtractor {
    pub fn new(paged_reader: Arc<dyn PagedDocumentReader>) -> Self {
        Self { paged_reader }
    }

    /// Extract the text of a document.
    ///
    /// Plain text comes back verbatim. Paged documents are read page by
    /// page in ascending order: items on a page are joined with a space,
    /// pages with a newline, and the result is trimmed.
    pub async fn extract(&self, document: Document) -> Result<String, DocumentError> {
        match document.media_type {
            MediaType::PlainText => Self::decode_plain_text(document.bytes),
            MediaType::Pdf => self.extract_paged(document.bytes).await,
        }
    }

    fn decode_plain_text(bytes: Vec<u8>) -> Result<String, DocumentError> {
        let text = String::from_utf8(bytes).map_err(|e| DocumentError::InvalidEncoding(e.to_string()))?;
        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    async fn extract_paged(&self, bytes: Vec<u8>) -> Result<String, DocumentError> {
        let size = bytes.len();
        let document = self
            .paged_reader
            .open(bytes)
            .await
            .map_err(DocumentError::Unreadable)?;
        let page_count = document.page_count();

        // Sequential on purpose: page order is the reading order
        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            let items = document
                .page_items(page)
                .await
                .map_err(DocumentError::Unreadable)?;
            let line = items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            pages.push(line);
        }

        let text = pages.join("\n").trim().to_string();
        tracing::info!(
            document_size = size,
            page_count = page_count,
            text_length = text.len(),
            "Paged document extracted"
        );
        Ok(text)
    }
}
