use async_trait::async_trait;

/// A run of text on a page, with the position the backend reported for it
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub position: Option<(f32, f32)>,
}

impl TextItem {
    pub fn new(text: impl Into<String>, position: (f32, f32)) -> Self {
        Self {
            text: text.into(),
            position: Some(position),
        }
    }
}

/// Backend that understands a paged document format
#[async_trait]
pub trait PagedDocumentReader: Send + Sync {
    /// Parse raw bytes into an openable document
    ///
    /// # Errors
    /// Returns error if the bytes are not a readable document
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, String>;
}

#[async_trait]
pub trait PagedDocument: Send + Sync {
    fn page_count(&self) -> u32;

    /// Text items of a 1-based page, in content order
    async fn page_items(&self, page: u32) -> Result<Vec<TextItem>, String>;
}
