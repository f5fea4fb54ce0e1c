//! Layout document parser
//!
//! Turns storyboard / xib text into the owned [`Document`] tree. Whitespace
//! between elements is dropped and the writer re-indents on output; text
//! content is kept exactly as written.

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

use crate::error::{PalettizeError, Result};
use crate::types::{Document, Element, Node, XmlDecl};
use crate::xml_helpers::collect_attributes;

/// Parse a layout document.
///
/// # Errors
/// Returns an error for malformed XML, mismatched or unclosed tags, non
/// UTF-8 content, or a document without a root element.
pub fn parse_document(text: &str) -> Result<Document> {
    let mut xml = Reader::from_str(text);

    let mut top: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let node = match xml.read_event()? {
            Event::Start(ref e) => {
                stack.push(start_element(e)?);
                continue;
            }
            Event::End(_) => {
                // quick-xml already checked the end name against the open tag
                let Some(mut done) = stack.pop() else {
                    return Err(PalettizeError::Parse("unexpected closing tag".into()));
                };
                drop_layout_whitespace(&mut done);
                Node::Element(done)
            }
            Event::Empty(ref e) => Node::Element(start_element(e)?),
            Event::Text(ref e) => {
                if stack.is_empty() && e.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                Node::Text(std::str::from_utf8(e)?.to_string())
            }
            Event::CData(ref e) => Node::CData(std::str::from_utf8(e)?.to_string()),
            Event::Comment(ref e) => Node::Comment(std::str::from_utf8(e)?.to_string()),
            Event::Decl(ref e) => Node::Decl(read_decl(e)?),
            Event::PI(ref e) => Node::ProcessingInstruction(std::str::from_utf8(e)?.to_string()),
            Event::DocType(ref e) => Node::DocType(std::str::from_utf8(e)?.to_string()),
            Event::Eof => break,
        };

        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => top.push(node),
        }
    }

    if let Some(open) = stack.last() {
        return Err(PalettizeError::Parse(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    let document = Document { nodes: top };
    if document.root().is_none() {
        return Err(PalettizeError::Parse("document has no root element".into()));
    }
    Ok(document)
}

fn is_blank(node: &Node) -> bool {
    matches!(node, Node::Text(text) if text.bytes().all(|b| b.is_ascii_whitespace()))
}

/// Remove indentation text from an element that holds markup. Elements with
/// only text keep it, blank or not.
fn drop_layout_whitespace(element: &mut Element) {
    if element.children.iter().all(|n| matches!(n, Node::Text(_))) {
        return;
    }
    element.children.retain(|n| !is_blank(n));
}

fn start_element(e: &BytesStart) -> Result<Element> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    Ok(Element {
        name,
        attributes: collect_attributes(e)?,
        children: Vec::new(),
    })
}

fn read_decl(e: &BytesDecl) -> Result<XmlDecl> {
    let version = std::str::from_utf8(&e.version()?)?.to_string();
    let encoding = match e.encoding() {
        Some(enc) => Some(std::str::from_utf8(&enc?)?.to_string()),
        None => None,
    };
    let standalone = match e.standalone() {
        Some(sa) => Some(std::str::from_utf8(&sa?)?.to_string()),
        None => None,
    };
    Ok(XmlDecl {
        version,
        encoding,
        standalone,
    })
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

    const SIMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document type="com.apple.InterfaceBuilder3.CocoaTouch.Storyboard.XIB" version="3.0">
    <!-- scenes -->
    <scenes>
        <label text="Hello &amp; bye" id="lbl-1">
            <string key="text">Title</string>
            <color key="textColor" red="1" green="0" blue="0" alpha="1"/>
        </label>
    </scenes>
    <resources/>
</document>
"#;

    #[test]
    fn test_parse_structure() {
        let doc = parse_document(SIMPLE).unwrap();
        assert!(matches!(doc.nodes[0], Node::Decl(_)));
        let root = doc.root().unwrap();
        assert_eq!(root.name, "document");
        assert!(matches!(root.children[0], Node::Comment(_)));

        let scenes = root.child_elements().next().unwrap();
        assert_eq!(scenes.name, "scenes");
        let label = scenes.child_elements().next().unwrap();
        assert_eq!(label.attr("text"), Some("Hello &amp; bye"));
        assert_eq!(label.attr("id"), Some("lbl-1"));

        let children: Vec<&Element> = label.child_elements().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].children, vec![Node::Text("Title".into())]);
        assert_eq!(children[1].name, "color");
        assert_eq!(children[1].attributes.len(), 5);
    }

    #[test]
    fn test_parse_decl() {
        let doc = parse_document(SIMPLE).unwrap();
        let Node::Decl(decl) = &doc.nodes[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.version, "1.0");
        assert_eq!(decl.encoding.as_deref(), Some("UTF-8"));
        assert_eq!(decl.standalone, None);
    }

    #[test]
    fn test_resources_found() {
        let doc = parse_document(SIMPLE).unwrap();
        assert!(doc.resources().is_some());
    }

    #[test]
    fn test_text_content_kept_verbatim() {
        let doc = parse_document(
            "<document>\n    <string key=\"text\">  Hello  </string>\n    <string key=\"blank\">   </string>\n</document>",
        )
        .unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.children.len(), 2);

        let strings: Vec<&Element> = root.child_elements().collect();
        assert_eq!(strings[0].children, vec![Node::Text("  Hello  ".into())]);
        assert_eq!(strings[1].children, vec![Node::Text("   ".into())]);
    }

    #[test]
    fn test_multiline_text_kept() {
        let doc =
            parse_document("<mutableString key=\"text\">first\n  second\n</mutableString>").unwrap();
        assert_eq!(
            doc.root().unwrap().children,
            vec![Node::Text("first\n  second\n".into())]
        );
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        assert!(parse_document("<document><a></b></document>").is_err());
    }

    #[test]
    fn test_unclosed_tag_rejected() {
        let err = parse_document("<document><scenes>").unwrap_err();
        assert!(err.to_string().contains("unclosed"), "{err}");
    }

    #[test]
    fn test_no_root_rejected() {
        assert!(parse_document(r#"<?xml version="1.0"?>"#).is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        assert!(parse_document(r#"<color red="1" red="0"/>"#).is_err());
    }
}
