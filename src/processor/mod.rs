//! Document processing
//!
//! Walks a parsed document, rewrites matching color nodes to named palette
//! colors, adds missing cell backgrounds, and declares every color used in
//! the document's resource table. Documents are processed one at a time; the
//! used-color accumulator is emptied at the end of each.

mod finalizer;
mod walker;

use log::debug;

use crate::error::Result;
use crate::export::write_document;
use crate::palette::PaletteColor;
use crate::parser::parse_document;
use crate::types::{Document, Node, ProcessReport, UsedColorSet};

use walker::TreeWalker;

/// Processing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Color given to cell content views that lack a background.
    pub default_background: PaletteColor,
    /// Do not declare a color the resource table already declares. Off by
    /// default: every used color gets a new entry.
    pub skip_declared_resources: bool,
    /// Append a `resources` element to the root when colors need declaring
    /// and there is none. Off by default: such documents get no entries.
    pub create_resources: bool,
    /// Record opaque colors that matched nothing in the report.
    pub collect_unmatched: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            default_background: PaletteColor::White,
            skip_declared_resources: false,
            create_resources: false,
            collect_unmatched: true,
        }
    }
}

/// Processes documents in sequence, one used-color set per document.
#[derive(Debug, Default)]
pub struct Processor {
    options: ProcessOptions,
    used: UsedColorSet,
}

impl Processor {
    pub fn new(options: ProcessOptions) -> Self {
        Self {
            options,
            used: UsedColorSet::new(),
        }
    }

    /// Process one document in place.
    pub fn process(&mut self, document: &mut Document) -> ProcessReport {
        let mut report = ProcessReport::default();

        let mut walker = TreeWalker::new(&self.options, &mut self.used, &mut report);
        for node in &mut document.nodes {
            if let Node::Element(element) = node {
                walker.visit(element);
            }
        }

        report.used_colors = self.used.iter().collect();
        report.declared_colors = finalizer::finalize(document, &mut self.used, &self.options);

        debug!(
            "{} node(s) rewritten, {} background(s) added, {} color(s) declared",
            report.rewritten,
            report.injected_backgrounds,
            report.declared_colors.len()
        );
        report
    }
}

/// Process a single document with `options`.
pub fn process_document(document: &mut Document, options: &ProcessOptions) -> ProcessReport {
    Processor::new(options.clone()).process(document)
}

/// Result of [`process_source`].
#[derive(Debug, Clone)]
pub struct ProcessedSource {
    pub text: String,
    pub report: ProcessReport,
}

/// Parse, process, and serialize one document's text.
///
/// # Errors
/// Returns an error if the text cannot be parsed or written back.
pub fn process_source(text: &str, processor: &mut Processor) -> Result<ProcessedSource> {
    let mut document = parse_document(text)?;
    let report = processor.process(&mut document);
    let text = write_document(&document)?;
    Ok(ProcessedSource { text, report })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Element;

    fn doc(body: &str) -> Document {
        parse_document(&format!(
            "<document><objects>{body}</objects><resources/></document>"
        ))
        .unwrap()
    }

    fn find<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
        if element.name == name {
            return Some(element);
        }
        element.child_elements().find_map(|c| find(c, name))
    }

    fn declared(document: &Document) -> Vec<String> {
        document
            .resources()
            .unwrap()
            .child_elements()
            .filter_map(|e| e.attr("name").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_process_rewrites_and_declares() {
        let mut document = doc(
            r#"<view><color key="backgroundColor" red="0.8784313725490196" green="0.19215686274509805" blue="0.19215686274509805" alpha="1" colorSpace="custom" customColorSpace="sRGB"/></view>"#,
        );
        let report = process_document(&mut document, &ProcessOptions::default());

        let color = find(document.root().unwrap(), "color").unwrap();
        assert_eq!(color.attr("key"), Some("backgroundColor"));
        assert_eq!(color.attr("name"), Some("poppyRed"));
        assert_eq!(color.attributes.len(), 2);

        assert_eq!(report.rewritten, 1);
        assert_eq!(report.used_colors, vec![PaletteColor::PoppyRed]);
        assert_eq!(report.declared_colors, vec![PaletteColor::PoppyRed]);
        assert_eq!(declared(&document), vec!["poppyRed"]);
    }

    #[test]
    fn test_used_set_is_emptied_between_documents() {
        let mut processor = Processor::default();
        let mut first = doc(r#"<color key="textColor" white="0.6" alpha="1"/>"#);
        let mut second = doc(r#"<label text="plain"/>"#);

        let a = processor.process(&mut first);
        let b = processor.process(&mut second);

        assert_eq!(a.declared_colors, vec![PaletteColor::Ash]);
        assert!(b.used_colors.is_empty());
        assert!(b.declared_colors.is_empty());
        assert_eq!(declared(&first), vec!["ash"]);
        assert!(declared(&second).is_empty());
    }

    #[test]
    fn test_colors_used_without_key_are_still_declared() {
        let mut document = doc(r#"<color white="1" alpha="1"/>"#);
        let report = process_document(&mut document, &ProcessOptions::default());
        assert_eq!(report.rewritten, 0);
        assert_eq!(report.declared_colors, vec![PaletteColor::White]);
        let color = find(document.root().unwrap(), "color").unwrap();
        assert_eq!(color.attr("white"), Some("1"));
    }

    #[test]
    fn test_missing_resources_created() {
        let mut document =
            parse_document(r#"<document><color key="c" white="0" alpha="1"/></document>"#).unwrap();
        let options = ProcessOptions {
            create_resources: true,
            ..ProcessOptions::default()
        };
        let report = process_document(&mut document, &options);
        assert_eq!(report.declared_colors, vec![PaletteColor::Black]);
        assert_eq!(declared(&document), vec!["black"]);
    }

    #[test]
    fn test_missing_resources_left_alone_by_default() {
        let mut document =
            parse_document(r#"<document><color key="c" white="0" alpha="1"/></document>"#).unwrap();
        let report = process_document(&mut document, &ProcessOptions::default());
        assert_eq!(report.used_colors, vec![PaletteColor::Black]);
        assert!(report.declared_colors.is_empty());
        assert!(document.resources().is_none());
    }

    #[test]
    fn test_declared_colors_not_duplicated_when_skipping() {
        let mut document = parse_document(
            r#"<document><color key="c" white="0" alpha="1"/><resources><namedColor name="black"/></resources></document>"#,
        )
        .unwrap();
        let options = ProcessOptions {
            skip_declared_resources: true,
            ..ProcessOptions::default()
        };
        let report = process_document(&mut document, &options);
        assert!(report.declared_colors.is_empty());
        assert_eq!(declared(&document), vec!["black"]);
    }

    #[test]
    fn test_every_used_color_appended_by_default() {
        let mut document = parse_document(
            r#"<document><color key="c" white="0" alpha="1"/><resources><namedColor name="black"/></resources></document>"#,
        )
        .unwrap();
        let report = process_document(&mut document, &ProcessOptions::default());
        assert_eq!(report.declared_colors, vec![PaletteColor::Black]);
        assert_eq!(declared(&document), vec!["black", "black"]);
    }

    #[test]
    fn test_unmatched_reported() {
        let mut document = doc(r#"<color key="tintColor" red="0.1" green="0.5" blue="0.9" alpha="1"/>"#);
        let report = process_document(&mut document, &ProcessOptions::default());
        assert_eq!(report.unmatched.len(), 1);
        let unmatched = &report.unmatched[0];
        assert_eq!(unmatched.key.as_deref(), Some("tintColor"));
        assert_eq!(unmatched.red, Some(25));
        assert_eq!(unmatched.hex, "#197fe5");
    }

    #[test]
    fn test_process_source_roundtrip() {
        let mut processor = Processor::default();
        let out = process_source(
            "<document><color key=\"k\" white=\"1\" alpha=\"1\"/><resources/></document>",
            &mut processor,
        )
        .unwrap();
        assert_eq!(
            out.text,
            "<document>\n    <color key=\"k\" name=\"white\"/>\n    <resources>\n        <namedColor name=\"white\"/>\n    </resources>\n</document>\n"
        );
        assert_eq!(out.report.rewritten, 1);
    }
}
