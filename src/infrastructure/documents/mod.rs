pub mod paged_document_reader;
pub mod pdf_document_reader;

pub use paged_document_reader::{PagedDocument, PagedDocumentReader, TextItem};
pub use pdf_document_reader::PdfDocumentReader;
