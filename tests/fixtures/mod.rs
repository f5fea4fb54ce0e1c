//! Test fixtures for generating storyboard documents in memory.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{color_rgb, StoryboardBuilder};
//!
//! let text = StoryboardBuilder::new()
//!     .add_view("label", &[color_rgb("textColor", 224, 49, 49, "1")])
//!     .build();
//! let document = palettize::parse_document(&text).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_lossless
)]

use palettize::types::{Document, Element};

/// Format an 8-bit channel the way Interface Builder serializes it.
pub fn channel(value: u16) -> String {
    format!("{}", f64::from(value) / 255.0)
}

/// `<color>` with red/green/blue channels given in 0-255.
pub fn color_rgb(key: &str, red: u16, green: u16, blue: u16, alpha: &str) -> String {
    format!(
        r#"<color key="{key}" red="{}" green="{}" blue="{}" alpha="{alpha}" colorSpace="custom" customColorSpace="sRGB"/>"#,
        channel(red),
        channel(green),
        channel(blue)
    )
}

/// `<color>` with a single white channel.
pub fn color_white(key: &str, white: &str, alpha: &str) -> String {
    format!(
        r#"<color key="{key}" white="{white}" alpha="{alpha}" colorSpace="custom" customColorSpace="genericGamma22GrayColorSpace"/>"#
    )
}

/// Builder for storyboard documents: one scene holding the added views.
#[derive(Debug, Clone, Default)]
pub struct StoryboardBuilder {
    views: Vec<String>,
    named_colors: Vec<String>,
    with_resources: bool,
}

impl StoryboardBuilder {
    pub fn new() -> Self {
        Self {
            with_resources: true,
            ..Self::default()
        }
    }

    /// Add a view element of type `tag` with the given raw children.
    pub fn add_view(mut self, tag: &str, children: &[String]) -> Self {
        let id = format!("view-{}", self.views.len() + 1);
        if children.is_empty() {
            self.views.push(format!(r#"<{tag} id="{id}"/>"#));
        } else {
            self.views
                .push(format!(r#"<{tag} id="{id}">{}</{tag}>"#, children.concat()));
        }
        self
    }

    /// Add raw markup inside the scene's objects.
    pub fn add_raw(mut self, xml: &str) -> Self {
        self.views.push(xml.to_string());
        self
    }

    /// Pre-declare a named color in the resource table.
    pub fn declare(mut self, name: &str) -> Self {
        self.named_colors.push(name.to_string());
        self
    }

    /// Leave the `<resources>` element out entirely.
    pub fn without_resources(mut self) -> Self {
        self.with_resources = false;
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        out.push_str(
            r#"<document type="com.apple.InterfaceBuilder3.CocoaTouch.Storyboard.XIB" version="3.0" toolsVersion="14460.31" targetRuntime="iOS.CocoaTouch" initialViewController="vc-1">"#,
        );
        out.push_str(r#"<scenes><scene sceneID="scene-1"><objects>"#);
        out.push_str(r#"<viewController id="vc-1"><view key="view" id="root-view"><subviews>"#);
        for view in &self.views {
            out.push_str(view);
        }
        out.push_str("</subviews></view></viewController>");
        out.push_str("</objects></scene></scenes>");
        if self.with_resources {
            if self.named_colors.is_empty() {
                out.push_str("<resources/>");
            } else {
                out.push_str("<resources>");
                for name in &self.named_colors {
                    out.push_str(&format!(r#"<namedColor name="{name}"/>"#));
                }
                out.push_str("</resources>");
            }
        }
        out.push_str("</document>\n");
        out
    }

    pub fn parse(&self) -> Document {
        palettize::parse_document(&self.build()).expect("fixture should parse")
    }
}

/// All elements named `name`, in document order.
pub fn find_all<'a>(element: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut out = Vec::new();
    collect(element, name, &mut out);
    out
}

fn collect<'a>(element: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    if element.name == name {
        out.push(element);
    }
    for child in element.child_elements() {
        collect(child, name, out);
    }
}

/// The `<color>` nodes of a document, in document order.
pub fn colors(document: &Document) -> Vec<&Element> {
    find_all(document.root().expect("root"), "color")
}

/// Names declared in the resource table, in order.
pub fn declared_names(document: &Document) -> Vec<String> {
    document
        .resources()
        .map(|r| {
            r.child_elements()
                .filter(|e| e.name == "namedColor")
                .filter_map(|e| e.attr("name").map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Attribute names of an element, in order.
pub fn attr_names(element: &Element) -> Vec<&str> {
    element
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect()
}
