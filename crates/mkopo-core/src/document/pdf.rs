//! PDF text extraction using pdf-extract.

use tracing::debug;

use super::{DocumentReader, Result};
use crate::error::DocumentError;

/// Reader for PDFs with an embedded text layer.
///
/// Scanned PDFs without text come back as empty (or whitespace-only) text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read_text(&self, data: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?;

        if text.trim().is_empty() {
            debug!("PDF has no text layer");
        }
        Ok(text)
    }
}
