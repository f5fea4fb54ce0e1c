//! Generates layout XML from a `Document`.
//!
//! Output follows the layout editors' own formatting: four-space indentation,
//! one element per line, self-closing empty elements, text content kept on
//! the same line as its element, and a trailing newline.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{PalettizeError, Result};
use crate::types::{Document, Element, Node};

const INDENT_SIZE: usize = 4;

/// Write a complete document as a string.
pub(crate) fn write_document_xml(document: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', INDENT_SIZE);
    for node in &document.nodes {
        write_node(&mut writer, node)?;
    }

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| PalettizeError::Other(format!("writer produced invalid UTF-8: {e}")))?;
    out.push('\n');
    Ok(out)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Element(element) => write_element(writer, element)?,
        Node::Text(text) => writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?,
        Node::CData(data) => writer.write_event(Event::CData(BytesCData::new(data.as_str())))?,
        Node::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
        }
        Node::Decl(decl) => writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?,
        Node::DocType(text) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?;
        }
        Node::ProcessingInstruction(text) => {
            writer.write_event(Event::PI(BytesText::from_escaped(text.as_str())))?;
        }
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        // Values are stored escaped; push them through untouched.
        start.push_attribute((attr.name.as_bytes(), attr.value.as_bytes()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
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
    use crate::parser::parse_document;
    use crate::types::Element;

    const STORYBOARD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document type="com.apple.InterfaceBuilder3.CocoaTouch.Storyboard.XIB" version="3.0" toolsVersion="14460.31">
    <scenes>
        <scene sceneID="abc">
            <objects>
                <label opaque="NO" text="Tom &amp; Jerry" id="lbl-1">
                    <string key="text">Hello</string>
                    <color key="textColor" red="1" green="0.5" blue="0" alpha="1" colorSpace="custom" customColorSpace="sRGB"/>
                </label>
            </objects>
        </scene>
    </scenes>
    <resources>
        <namedColor name="white"/>
    </resources>
</document>
"#;

    #[test]
    fn test_canonical_document_roundtrips_exactly() {
        let doc = parse_document(STORYBOARD).unwrap();
        let out = write_document_xml(&doc).unwrap();
        assert_eq!(out, STORYBOARD);
    }

    #[test]
    fn test_inserted_element_is_indented() {
        let mut doc = parse_document(STORYBOARD).unwrap();
        doc.resources_mut()
            .unwrap()
            .push_child(Element::new("namedColor").with_attr("name", "ash"));
        let out = write_document_xml(&doc).unwrap();
        assert!(out.contains(
            "        <namedColor name=\"white\"/>\n        <namedColor name=\"ash\"/>\n    </resources>"
        ));
    }

    #[test]
    fn test_comment_and_cdata_preserved() {
        let doc = parse_document("<root><!-- note --><data><![CDATA[a < b]]></data></root>").unwrap();
        let out = write_document_xml(&doc).unwrap();
        assert!(out.contains("<!-- note -->"));
        assert!(out.contains("<![CDATA[a < b]]>"));
    }

    #[test]
    fn test_padded_and_blank_text_roundtrips() {
        let text = "<label id=\"lbl-1\">\n    <string key=\"text\">  Hello  </string>\n    <string key=\"placeholder\"> </string>\n</label>\n";
        let doc = parse_document(text).unwrap();
        assert_eq!(write_document_xml(&doc).unwrap(), text);
    }

    #[test]
    fn test_trailing_newline() {
        let doc = parse_document("<root/>").unwrap();
        assert_eq!(write_document_xml(&doc).unwrap(), "<root/>\n");
    }
}
