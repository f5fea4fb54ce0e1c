//! Palette matching through full document processing.
//!
//! Every canonical triple of every palette entry is fed through a storyboard
//! and must come out as a named color reference.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{attr_names, color_rgb, color_white, colors, StoryboardBuilder};
use palettize::palette::lookup;
use palettize::{process_document, PaletteColor, ProcessOptions};
use test_case::test_case;

fn process_single(color_xml: &str) -> (palettize::Document, palettize::ProcessReport) {
    let mut document = StoryboardBuilder::new()
        .add_view("label", &[color_xml.to_string()])
        .parse();
    let report = process_document(&mut document, &ProcessOptions::default());
    (document, report)
}

// ============================================================================
// Exact RGB matches
// ============================================================================

#[test_case(153, 153, 153, "ash" ; "ash")]
#[test_case(0, 0, 0, "black" ; "black")]
#[test_case(102, 102, 102, "charcoal" ; "charcoal")]
#[test_case(69, 106, 168, "confidentOrange" ; "confident orange secondary")]
#[test_case(214, 214, 214, "gray" ; "gray")]
#[test_case(191, 134, 80, "latte" ; "latte")]
#[test_case(244, 248, 266, "lemonade" ; "lemonade out of range blue")]
#[test_case(245, 245, 245, "lightgray" ; "lightgray")]
#[test_case(224, 49, 49, "poppyRed" ; "poppy red")]
#[test_case(255, 255, 255, "white" ; "white")]
fn test_exact_triple_rewritten(red: u16, green: u16, blue: u16, expected: &str) {
    let (document, report) = process_single(&color_rgb("textColor", red, green, blue, "1"));
    let color = colors(&document)[0];
    assert_eq!(attr_names(color), vec!["key", "name"]);
    assert_eq!(color.attr("key"), Some("textColor"));
    assert_eq!(color.attr("name"), Some(expected));
    assert_eq!(report.rewritten, 1);
}

#[test]
fn test_every_triple_matches_its_entry() {
    for entry in lookup() {
        for triple in entry.triples {
            let (document, report) = process_single(&color_rgb(
                "tintColor",
                triple.red,
                triple.green,
                triple.blue,
                "1",
            ));
            assert!(
                report.used_colors.contains(&entry.color),
                "{} triple {:?} not matched, used {:?}",
                entry.color,
                triple,
                report.used_colors
            );
            let color = colors(&document)[0];
            assert_eq!(attr_names(color), vec!["key", "name"]);
        }
    }
}

// ============================================================================
// Several entries matching one node
// ============================================================================

#[test_case(255, 84, 15, PaletteColor::ConfidentOrange ; "confident orange primary")]
#[test_case(255, 115, 115, PaletteColor::ConfidentOrange ; "confident orange coral")]
#[test_case(255, 240, 240, PaletteColor::Lemonade ; "lemonade pink")]
#[test_case(255, 210, 103, PaletteColor::WarmYellow ; "warm yellow")]
fn test_full_red_also_matches_white_and_white_wins(
    red: u16,
    green: u16,
    blue: u16,
    chromatic: PaletteColor,
) {
    let (document, report) = process_single(&color_rgb("textColor", red, green, blue, "1"));
    assert_eq!(report.used_colors, vec![chromatic, PaletteColor::White]);
    assert_eq!(
        report.declared_colors,
        vec![chromatic, PaletteColor::White]
    );
    // The last palette entry applied is the one left on the node.
    assert_eq!(colors(&document)[0].attr("name"), Some("white"));
    assert_eq!(report.rewritten, 1);
}

#[test]
fn test_achromatic_red_rule_ignores_green_and_blue() {
    let (document, report) = process_single(&color_rgb("textColor", 153, 10, 250, "1"));
    assert_eq!(report.used_colors, vec![PaletteColor::Ash]);
    assert_eq!(colors(&document)[0].attr("name"), Some("ash"));
}

// ============================================================================
// White channel
// ============================================================================

#[test_case("0.600", "ash" ; "ash white")]
#[test_case("0.59999999999999998", "ash" ; "ash white with noise")]
#[test_case("0.40000000000000002", "charcoal" ; "charcoal white")]
#[test_case("0", "black" ; "black white")]
#[test_case("1", "white" ; "white white")]
fn test_white_channel_exact(white: &str, expected: &str) {
    let (document, report) = process_single(&color_white("backgroundColor", white, "1"));
    assert_eq!(colors(&document)[0].attr("name"), Some(expected));
    assert_eq!(report.used_colors.len(), 1);
}

// ============================================================================
// Nearest gray fallback
// ============================================================================

#[test_case("0.5", "ash" ; "tie between charcoal and ash goes to ash")]
#[test_case("0.45", "charcoal" ; "closer to charcoal")]
#[test_case("0.8", "gray" ; "closer to gray")]
#[test_case("0.97", "lightgray" ; "closer to lightgray")]
#[test_case("0.02", "charcoal" ; "near black is not black")]
fn test_white_channel_nearest_gray(white: &str, expected: &str) {
    let (document, report) = process_single(&color_white("backgroundColor", white, "1"));
    assert_eq!(colors(&document)[0].attr("name"), Some(expected));
    assert_eq!(report.used_colors.len(), 1);
    assert_eq!(report.rewritten, 1);
}

#[test]
fn test_equal_rgb_channels_use_nearest_gray() {
    let xml = r#"<color key="textColor" red="0.3" green="0.3" blue="0.3" alpha="1" colorSpace="custom" customColorSpace="sRGB"/>"#;
    let (document, report) = process_single(xml);
    assert_eq!(colors(&document)[0].attr("name"), Some("charcoal"));
    assert_eq!(report.used_colors, vec![PaletteColor::Charcoal]);
}

#[test]
fn test_unequal_unmatched_rgb_left_alone() {
    let xml = r#"<color key="textColor" red="0.3" green="0.31" blue="0.3" alpha="1" colorSpace="custom" customColorSpace="sRGB"/>"#;
    let (document, report) = process_single(xml);
    let color = colors(&document)[0];
    assert_eq!(color.attr("red"), Some("0.3"));
    assert!(color.attr("name").is_none());
    assert!(report.used_colors.is_empty());
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].hex, "#4c4f4c");
}

// ============================================================================
// Non-matches
// ============================================================================

#[test_case("0.5" ; "half alpha")]
#[test_case("0" ; "transparent")]
#[test_case("opaque" ; "unparseable alpha")]
fn test_non_opaque_never_rewritten(alpha: &str) {
    let xml = color_rgb("textColor", 224, 49, 49, alpha);
    let (document, report) = process_single(&xml);
    let color = colors(&document)[0];
    assert_eq!(color.attr("alpha"), Some(alpha));
    assert!(color.attr("name").is_none());
    assert!(report.used_colors.is_empty());
    assert!(report.declared_colors.is_empty());
    assert!(report.unmatched.is_empty());
}

#[test]
fn test_missing_alpha_never_rewritten() {
    let xml = r#"<color key="textColor" red="1" green="1" blue="1" colorSpace="custom" customColorSpace="sRGB"/>"#;
    let (document, report) = process_single(xml);
    assert!(colors(&document)[0].attr("name").is_none());
    assert!(report.used_colors.is_empty());
}

#[test]
fn test_unparseable_channel_is_no_match() {
    let xml = r#"<color key="textColor" red="bad" green="0.192" blue="0.192" alpha="1"/>"#;
    let (document, report) = process_single(xml);
    assert_eq!(colors(&document)[0].attr("red"), Some("bad"));
    assert!(report.used_colors.is_empty());
}

#[test_case("NaN" ; "nan")]
#[test_case("inf" ; "infinity")]
#[test_case("-Infinity" ; "negative infinity")]
fn test_non_finite_white_is_no_match(white: &str) {
    let xml = color_white("backgroundColor", white, "1");
    let (document, report) = process_single(&xml);
    let color = colors(&document)[0];
    assert_eq!(color.attr("white"), Some(white));
    assert!(color.attr("name").is_none());
    assert!(report.used_colors.is_empty());
}

#[test]
fn test_non_finite_rgb_is_no_match() {
    let xml = r#"<color key="textColor" red="inf" green="inf" blue="inf" alpha="1"/>"#;
    let (document, report) = process_single(xml);
    assert_eq!(colors(&document)[0].attr("red"), Some("inf"));
    assert!(report.used_colors.is_empty());
}

#[test]
fn test_system_colors_are_ignored() {
    let xml = r#"<color key="textColor" cocoaTouchSystemColor="darkTextColor"/>"#;
    let (document, report) = process_single(xml);
    let color = colors(&document)[0];
    assert_eq!(attr_names(color), vec!["key", "cocoaTouchSystemColor"]);
    assert!(report.used_colors.is_empty());
}
