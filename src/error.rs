//! Structured error types for palettize.

/// All errors that can occur while loading, processing, or writing layout documents.
#[derive(Debug, thiserror::Error)]
pub enum PalettizeError {
    /// XML parsing or writing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute inside a start tag.
    #[error("XML attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Document text that is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Structural problem in an otherwise well-formed token stream.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No input documents were found.
    #[error("No input documents found: {0}")]
    NoInputs(String),

    /// Report serialization error.
    #[error("JSON serialization: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PalettizeError>;

impl From<String> for PalettizeError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for PalettizeError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
