use super::paged_document_reader::{PagedDocument, PagedDocumentReader, TextItem};
use async_trait::async_trait;
use lopdf::content::Content;
use lopdf::{Document, Encoding, Object, ObjectId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// PDF backend built on `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfDocumentReader;

impl PdfDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

struct PdfDocument {
    inner: Arc<Document>,
    pages: BTreeMap<u32, ObjectId>,
}

#[async_trait]
impl PagedDocumentReader for PdfDocumentReader {
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, String> {
        let size = bytes.len();
        let document = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
            .await
            .map_err(|e| format!("PDF parsing task failed: {}", e))?
            .map_err(|e| format!("invalid PDF: {}", e))?;

        let pages = document.get_pages();
        tracing::debug!(size = size, page_count = pages.len(), "PDF opened");

        Ok(Box::new(PdfDocument {
            inner: Arc::new(document),
            pages,
        }))
    }
}

#[async_trait]
impl PagedDocument for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page_items(&self, page: u32) -> Result<Vec<TextItem>, String> {
        let page_id = *self
            .pages
            .get(&page)
            .ok_or_else(|| format!("page {} out of range 1..={}", page, self.page_count()))?;

        let document = self.inner.clone();
        let items = tokio::task::spawn_blocking(move || page_text_items(&document, page_id))
            .await
            .map_err(|e| format!("PDF extraction task failed: {}", e))?
            .map_err(|e| format!("failed to extract text from page {}: {}", page, e))?;

        tracing::debug!(page = page, items = items.len(), "PDF page read");
        Ok(items)
    }
}

/// Text-space origin of the current line. Matrix scaling and rotation are not applied.
#[derive(Debug, Default, Clone, Copy)]
struct LineOrigin {
    x: f32,
    y: f32,
    leading: f32,
}

impl LineOrigin {
    fn next_line(&mut self) {
        self.y -= self.leading;
    }
}

fn operand(operands: &[Object], index: usize) -> f32 {
    operands
        .get(index)
        .and_then(|o| o.as_float().ok())
        .unwrap_or_default()
}

/// Decoded string operands of one show-text operation. Large negative
/// kerning inside a `TJ` array counts as a word gap.
fn shown_text(encoding: &Encoding, operands: &[Object], text: &mut String) -> lopdf::Result<()> {
    for item in operands {
        match item {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(elements) => shown_text(encoding, elements, text)?,
            Object::Integer(kern) if *kern < -100 => text.push(' '),
            Object::Real(kern) if *kern < -100.0 => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}

/// One item per show-text operation (`Tj`, `TJ`, `'`, `"`), in content order
fn page_text_items(document: &Document, page_id: ObjectId) -> lopdf::Result<Vec<TextItem>> {
    let encodings = document
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(document).map(|encoding| (name, encoding)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;
    let content = Content::decode(&document.get_page_content(page_id)?)?;

    let mut items = Vec::new();
    let mut encoding = None;
    let mut origin = LineOrigin::default();

    for operation in &content.operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "BT" => {
                origin = LineOrigin {
                    leading: origin.leading,
                    ..LineOrigin::default()
                }
            }
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "TL" => origin.leading = operand(operands, 0),
            "Td" => {
                origin.x += operand(operands, 0);
                origin.y += operand(operands, 1);
            }
            "TD" => {
                origin.leading = -operand(operands, 1);
                origin.x += operand(operands, 0);
                origin.y += operand(operands, 1);
            }
            "Tm" => {
                origin.x = operand(operands, 4);
                origin.y = operand(operands, 5);
            }
            "T*" => origin.next_line(),
            operator @ ("Tj" | "TJ" | "'" | "\"") => {
                if matches!(operator, "'" | "\"") {
                    origin.next_line();
                }
                let Some(encoding) = encoding else {
                    tracing::debug!(operator = operator, "Text shown without a known font, skipped");
                    continue;
                };

                let mut text = String::new();
                shown_text(encoding, operands, &mut text)?;
                let text = text.trim();
                if !text.is_empty() {
                    items.push(TextItem::new(text, (origin.x, origin.y)));
                }
            }
            _ => {}
        }
    }

    Ok(items)
}
