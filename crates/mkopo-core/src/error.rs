//! Error types for the mkopo-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the mkopo library.
#[derive(Error, Debug)]
pub enum MkopoError {
    /// Configuration or reference-data error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Field extraction setup error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Document text extraction error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading configuration or the location taxonomy.
///
/// These are startup-time failures: extraction cannot proceed without
/// valid reference data.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The taxonomy resource does not follow the region/district/ward schema.
    #[error("invalid location taxonomy: {0}")]
    Taxonomy(String),

    /// The resource is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The resource could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors in a field extractor's own pattern declarations.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A field was declared with no patterns.
    #[error("no patterns declared for field {field}")]
    EmptyPatternSet { field: String },

    /// A pattern refers to a placeholder the library does not define.
    #[error("unknown placeholder {{{placeholder}}} in pattern for field {field}")]
    UnknownPlaceholder { field: String, placeholder: String },

    /// A declared pattern failed to compile.
    #[error("invalid pattern for field {field}: {pattern}: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors related to turning a document file into plain text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input path does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not one of the supported formats.
    #[error("unsupported file format: '{0}' (supported: .txt, .pdf, .docx)")]
    UnsupportedFormat(String),

    /// Failed to extract text from a PDF.
    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),

    /// Failed to read a DOCX package.
    #[error("failed to extract text from DOCX: {0}")]
    Docx(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the mkopo library.
pub type Result<T> = std::result::Result<T, MkopoError>;
