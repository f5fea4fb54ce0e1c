//! Layout document export.
//!
//! Serializes a processed [`Document`] back to the layout markup dialect.
//! Untouched attributes keep their original escaped text; element order and
//! attribute order are preserved.

pub(crate) mod document_writer;

use crate::error::Result;
use crate::types::{Document, ProcessReport};

/// Serialize a document to text ready to be written or printed.
///
/// # Errors
/// Returns an error if the XML writer fails or a node holds invalid markup.
pub fn write_document(document: &Document) -> Result<String> {
    document_writer::write_document_xml(document)
}

/// Serialize processing reports as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn reports_to_json(reports: &[ProcessReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
