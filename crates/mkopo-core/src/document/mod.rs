//! Plain-text extraction from application documents.

mod docx;
mod pdf;

pub use docx::DocxReader;
pub use pdf::PdfReader;

use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// UTF-8 plain text.
    Text,
    /// PDF with a text layer.
    Pdf,
    /// Word (Office Open XML) document.
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(DocumentError::UnsupportedFormat(ext)),
        }
    }
}

/// Trait for format-specific text readers.
pub trait DocumentReader {
    /// Extract plain text from the raw file contents.
    fn read_text(&self, data: &[u8]) -> Result<String>;
}

/// Reader for plain text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn read_text(&self, data: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Extract text from raw bytes of a known format.
pub fn extract_text_from_bytes(format: DocumentFormat, data: &[u8]) -> Result<String> {
    match format {
        DocumentFormat::Text => PlainTextReader.read_text(data),
        DocumentFormat::Pdf => PdfReader.read_text(data),
        DocumentFormat::Docx => DocxReader.read_text(data),
    }
}

/// Extract text from a `.txt`, `.pdf` or `.docx` file.
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let format = DocumentFormat::from_path(path)?;
    let data = std::fs::read(path)?;
    debug!("Read {} bytes from {} ({:?})", data.len(), path.display(), format);

    let text = extract_text_from_bytes(format, &data)?;
    debug!("Extracted {} characters of text", text.len());
    Ok(text)
}

/// Whether the file extension is one of the supported formats.
pub fn is_supported(path: &Path) -> bool {
    DocumentFormat::from_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b/form.TXT")).unwrap(),
            DocumentFormat::Text
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("scan.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("letter.docx")).unwrap(),
            DocumentFormat::Docx
        );
        assert!(matches!(
            DocumentFormat::from_path(Path::new("photo.jpg")),
            Err(DocumentError::UnsupportedFormat(ext)) if ext == "jpg"
        ));
        assert!(!is_supported(Path::new("README")));
    }

    #[test]
    fn test_extract_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applicant.txt");
        std::fs::write(&path, "Name: Juma Mkono\nAge: 29").unwrap();

        assert_eq!(extract_text(&path).unwrap(), "Name: Juma Mkono\nAge: 29");
    }

    #[test]
    fn test_missing_file() {
        let path = PathBuf::from("/nonexistent/applicant.txt");
        assert!(matches!(extract_text(&path), Err(DocumentError::NotFound(_))));
    }

    #[test]
    fn test_unsupported_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applicant.rtf");
        std::fs::write(&path, "{\\rtf1}").unwrap();

        assert!(matches!(
            extract_text(&path),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }
}
