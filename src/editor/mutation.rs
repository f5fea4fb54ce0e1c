//! Element mutations.

use log::debug;

use super::{BACKGROUND_COLOR_KEY, COLOR_TAG, NAMED_COLOR_ELEMENT};
use crate::palette::PaletteColor;
use crate::types::{Attribute, Element};
use crate::xml_helpers::attr_string;

/// Rewrite a color node to reference `color` by name.
///
/// Afterwards the node carries exactly `key` (unchanged) and `name`; every
/// channel, alpha, and color-space attribute is gone. A node without `key`
/// is left untouched and `false` is returned.
pub fn rewrite_color_node(element: &mut Element, color: PaletteColor) -> bool {
    let Some(key) = element
        .attributes
        .iter()
        .find(|a| a.name == "key")
        .cloned()
    else {
        debug!("<{}> has no key, not rewritten to {color}", element.name);
        return false;
    };

    element.attributes = vec![key, Attribute::new("name", color.name())];
    true
}

/// Give a cell content view a `backgroundColor` child if it has none.
///
/// Only direct children are inspected: any child whose tag contains `color`
/// and whose `key` is `backgroundColor` counts, whatever its value. Returns
/// `true` when a node was appended.
pub fn ensure_background_color(container: &mut Element, color: PaletteColor) -> bool {
    let has_background = container.child_elements().any(|child| {
        child.name.contains(COLOR_TAG)
            && attr_string(child, "key").as_deref() == Some(BACKGROUND_COLOR_KEY)
    });
    if has_background {
        return false;
    }

    container.push_child(
        Element::new(COLOR_TAG)
            .with_attr("key", BACKGROUND_COLOR_KEY)
            .with_attr("name", color.name()),
    );
    true
}

/// Whether the resource table already declares `color`.
pub fn declares_named_color(resources: &Element, color: PaletteColor) -> bool {
    resources.child_elements().any(|child| {
        child.name == NAMED_COLOR_ELEMENT
            && attr_string(child, "name").as_deref() == Some(color.name())
    })
}

/// Append a `namedColor` declaration for `color` to the resource table.
pub fn declare_named_color(resources: &mut Element, color: PaletteColor) {
    resources.push_child(Element::new(NAMED_COLOR_ELEMENT).with_attr("name", color.name()));
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
    use crate::types::Node;

    fn color_node() -> Element {
        Element::new("color")
            .with_attr("key", "textColor")
            .with_attr("red", "1")
            .with_attr("green", "0")
            .with_attr("blue", "0")
            .with_attr("alpha", "1")
            .with_attr("colorSpace", "custom")
            .with_attr("customColorSpace", "sRGB")
    }

    #[test]
    fn test_rewrite_keeps_only_key_and_name() {
        let mut node = color_node();
        assert!(rewrite_color_node(&mut node, PaletteColor::PoppyRed));
        assert_eq!(
            node.attributes,
            vec![
                Attribute::new("key", "textColor"),
                Attribute::new("name", "poppyRed")
            ]
        );
    }

    #[test]
    fn test_rewrite_last_call_wins() {
        let mut node = color_node();
        rewrite_color_node(&mut node, PaletteColor::ConfidentOrange);
        rewrite_color_node(&mut node, PaletteColor::White);
        assert_eq!(node.attr("key"), Some("textColor"));
        assert_eq!(node.attr("name"), Some("white"));
        assert_eq!(node.attributes.len(), 2);
    }

    #[test]
    fn test_rewrite_without_key_is_noop() {
        let mut node = Element::new("color")
            .with_attr("white", "1")
            .with_attr("alpha", "1");
        let before = node.clone();
        assert!(!rewrite_color_node(&mut node, PaletteColor::White));
        assert_eq!(node, before);
    }

    #[test]
    fn test_background_injected_into_empty_container() {
        let mut view = Element::new("tableViewCellContentView");
        assert!(ensure_background_color(&mut view, PaletteColor::White));
        assert_eq!(view.children.len(), 1);
        let Node::Element(child) = &view.children[0] else {
            panic!("expected element");
        };
        assert_eq!(child.name, "color");
        assert_eq!(
            child.attributes,
            vec![
                Attribute::new("key", "backgroundColor"),
                Attribute::new("name", "white")
            ]
        );
    }

    #[test]
    fn test_existing_background_is_respected() {
        let mut view = Element::new("tableViewCellContentView");
        view.push_child(
            Element::new("color")
                .with_attr("key", "backgroundColor")
                .with_attr("name", "latte"),
        );
        assert!(!ensure_background_color(&mut view, PaletteColor::White));
        assert_eq!(view.children.len(), 1);
    }

    #[test]
    fn test_background_check_is_one_level_deep() {
        let mut view = Element::new("tableViewCellContentView");
        let mut subview = Element::new("view");
        subview.push_child(Element::new("color").with_attr("key", "backgroundColor"));
        view.push_child(subview);
        assert!(ensure_background_color(&mut view, PaletteColor::White));
        assert_eq!(view.children.len(), 2);
    }

    #[test]
    fn test_declare_named_color() {
        let mut resources = Element::new("resources");
        assert!(!declares_named_color(&resources, PaletteColor::Ash));
        declare_named_color(&mut resources, PaletteColor::Ash);
        assert!(declares_named_color(&resources, PaletteColor::Ash));
        assert!(!declares_named_color(&resources, PaletteColor::Gray));
    }
}
