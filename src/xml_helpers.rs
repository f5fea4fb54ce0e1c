//! Shared XML attribute utilities.
//!
//! Attribute values are stored escaped (as read). These helpers convert
//! between the raw quick-xml start tags, the owned element model, and the
//! unescaped / numeric views the color matcher needs.

use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;

use crate::error::Result;
use crate::types::{Attribute, Element};

/// Collect every attribute of a start tag, in source order, keeping values escaped.
pub fn collect_attributes(e: &BytesStart) -> Result<Vec<Attribute>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let name = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        out.push(Attribute::from_escaped(name, value));
    }
    Ok(out)
}

/// Extract an attribute value by key, unescaped.
///
/// Returns `None` if the attribute is missing or holds a malformed entity.
pub fn attr_string(e: &Element, key: &str) -> Option<String> {
    let raw = e.attr(key)?;
    unescape(raw).ok().map(|s| s.into_owned())
}

/// Extract an `f64` attribute value by key.
///
/// Surrounding whitespace is ignored. Anything that fails to parse, and the
/// non-finite spellings `NaN` / `inf` / `infinity`, is `None`.
pub fn attr_f64(e: &Element, key: &str) -> Option<f64> {
    attr_string(e, key)
        .and_then(|s| s.trim().parse().ok())
        .filter(|v: &f64| v.is_finite())
}

/// Escape text for use inside an attribute value or text node.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn make_start(xml: &str) -> BytesStart<'_> {
        // Strip < and > / /> to get just the tag content
        let content = xml
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim_end_matches('/');
        BytesStart::from_content(content, content.find(' ').unwrap_or(content.len()))
    }

    #[test]
    fn test_collect_attributes_keeps_order_and_escapes() {
        let e = make_start(r#"<label text="Tom &amp; Jerry" id="abc-12" key="view"/>"#);
        let attrs = collect_attributes(&e).unwrap();
        let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["text", "id", "key"]);
        assert_eq!(attrs[0].value, "Tom &amp; Jerry");
    }

    #[test]
    fn test_attr_string_unescapes() {
        let el = Element::new("label").with_attr("text", "a < b");
        assert_eq!(el.attr("text"), Some("a &lt; b"));
        assert_eq!(attr_string(&el, "text"), Some("a < b".to_string()));
        assert_eq!(attr_string(&el, "missing"), None);
    }

    #[test]
    fn test_attr_f64() {
        let el = Element::new("color")
            .with_attr("red", "0.95294117647058818")
            .with_attr("alpha", " 1 ")
            .with_attr("green", "abc");
        let red = attr_f64(&el, "red").unwrap();
        assert!((red - 243.0 / 255.0).abs() < 1e-12);
        assert_eq!(attr_f64(&el, "alpha"), Some(1.0));
        assert_eq!(attr_f64(&el, "green"), None);
        assert_eq!(attr_f64(&el, "blue"), None);
    }

    #[test]
    fn test_attr_f64_rejects_non_finite() {
        let el = Element::new("color")
            .with_attr("white", "NaN")
            .with_attr("red", "inf")
            .with_attr("green", "-infinity");
        assert_eq!(attr_f64(&el, "white"), None);
        assert_eq!(attr_f64(&el, "red"), None);
        assert_eq!(attr_f64(&el, "green"), None);
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
        assert_eq!(xml_escape("plain"), "plain");
    }
}
