//! Color matching
//!
//! Decides whether a color node's raw channels correspond to a palette entry.
//! Channels are compared after rounding to three decimals, which absorbs the
//! float noise of serialized values such as `0.95294117647058818`.
//!
//! Three exact rules are tried per palette triple:
//! 1. achromatic entry, node has `white`, `round3(triple.red) == round3(white)`
//! 2. achromatic entry, `round3(triple.red) == round3(red)`
//! 3. all three channels equal after rounding
//!
//! When no exact rule fires and the node is grayscale, the nearest gray
//! palette entry is chosen instead.

use crate::palette::{gray_subset, lookup, PaletteColor, PaletteEntry, Rgb8};
use crate::types::Element;
use crate::xml_helpers::attr_f64;

/// Round to three decimal places, as a comparable string.
pub fn round3(value: f64) -> String {
    format!("{value:.3}")
}

/// The numeric channels of a color node.
///
/// A channel is `None` when its attribute is missing or does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorChannels {
    pub red: Option<f64>,
    pub green: Option<f64>,
    pub blue: Option<f64>,
    pub white: Option<f64>,
    pub alpha: Option<f64>,
}

impl ColorChannels {
    pub fn from_element(e: &Element) -> Self {
        Self {
            red: attr_f64(e, "red"),
            green: attr_f64(e, "green"),
            blue: attr_f64(e, "blue"),
            white: attr_f64(e, "white"),
            alpha: attr_f64(e, "alpha"),
        }
    }

    /// Only fully opaque colors are ever matched.
    pub fn is_opaque(&self) -> bool {
        self.alpha.is_some_and(|a| (a - 1.0).abs() < f64::EPSILON)
    }

    /// Eligible for the nearest-gray fallback: a `white` channel, or red, green,
    /// and blue all present and equal after rounding.
    pub fn is_grayscale(&self) -> bool {
        if self.white.is_some() {
            return true;
        }
        match (self.red, self.green, self.blue) {
            (Some(r), Some(g), Some(b)) => {
                let g = round3(g);
                round3(r) == g && round3(b) == g
            }
            _ => false,
        }
    }

    /// The single value the gray fallback measures: `white`, else `red`.
    pub fn gray_value(&self) -> Option<f64> {
        self.white.or(self.red)
    }
}

/// Outcome of matching one color node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMatch {
    /// One or more palette entries matched exactly, in palette order.
    Exact(Vec<PaletteColor>),
    /// No exact match; the closest gray entry was chosen.
    NearestGray(PaletteColor),
    /// Not opaque, or nothing matched.
    Unmatched,
}

impl ColorMatch {
    /// The colors to apply, in the order they must be applied.
    pub fn colors(&self) -> &[PaletteColor] {
        match self {
            Self::Exact(colors) => colors,
            Self::NearestGray(color) => std::slice::from_ref(color),
            Self::Unmatched => &[],
        }
    }
}

fn channel_eq(expected: f64, actual: Option<f64>) -> bool {
    actual.is_some_and(|v| round3(expected) == round3(v))
}

fn triple_matches(entry: &PaletteEntry, triple: Rgb8, channels: &ColorChannels) -> bool {
    if entry.achromatic && channel_eq(triple.red(), channels.white) {
        return true;
    }
    if entry.achromatic && channel_eq(triple.red(), channels.red) {
        return true;
    }
    channel_eq(triple.red(), channels.red)
        && channel_eq(triple.green(), channels.green)
        && channel_eq(triple.blue(), channels.blue)
}

/// Every palette entry one of whose triples matches exactly, in palette order.
///
/// Alpha is not checked here; see [`match_color`].
pub fn match_exact(channels: &ColorChannels) -> Vec<PaletteColor> {
    lookup()
        .iter()
        .filter(|entry| {
            entry
                .triples
                .iter()
                .any(|&triple| triple_matches(entry, triple, channels))
        })
        .map(|entry| entry.color)
        .collect()
}

/// Closest gray entry to `value` by absolute red-channel difference.
///
/// `0` is always black and `1` always white. Ties go to the entry declared first.
pub fn nearest_gray(value: f64) -> Option<PaletteColor> {
    if value.abs() < f64::EPSILON {
        return Some(PaletteColor::Black);
    }
    if (value - 1.0).abs() < f64::EPSILON {
        return Some(PaletteColor::White);
    }

    let mut best: Option<(PaletteColor, f64)> = None;
    for entry in gray_subset() {
        let Some(triple) = entry.triples.first() else {
            continue;
        };
        let distance = (value - triple.red()).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((entry.color, distance)),
        }
    }
    best.map(|(color, _)| color)
}

/// Match a color node's channels against the palette.
pub fn match_color(channels: &ColorChannels) -> ColorMatch {
    if !channels.is_opaque() {
        return ColorMatch::Unmatched;
    }

    let exact = match_exact(channels);
    if !exact.is_empty() {
        return ColorMatch::Exact(exact);
    }

    if channels.is_grayscale() {
        if let Some(color) = channels.gray_value().and_then(nearest_gray) {
            return ColorMatch::NearestGray(color);
        }
    }

    ColorMatch::Unmatched
}

/// Convert a normalized channel to 0-255, truncating and clamping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_rgb8(value: f64) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

/// `#rrggbb` for normalized channels; missing channels count as zero.
///
/// Each channel goes through [`to_rgb8`], so the result truncates rather
/// than rounds: `0.1` becomes `19`, not `1a`.
pub fn to_hex_string(red: Option<f64>, green: Option<f64>, blue: Option<f64>) -> String {
    let r = to_rgb8(red.unwrap_or(0.0));
    let g = to_rgb8(green.unwrap_or(0.0));
    let b = to_rgb8(blue.unwrap_or(0.0));
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    fn rgb(red: f64, green: f64, blue: f64) -> ColorChannels {
        ColorChannels {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            white: None,
            alpha: Some(1.0),
        }
    }

    fn white(value: f64) -> ColorChannels {
        ColorChannels {
            white: Some(value),
            alpha: Some(1.0),
            ..ColorChannels::default()
        }
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.6), "0.600");
        assert_eq!(round3(153.0 / 255.0), "0.600");
        assert_eq!(round3(266.0 / 255.0), "1.043");
        assert_eq!(round3(1.0), "1.000");
    }

    #[test]
    fn test_exact_chromatic_match() {
        let channels = rgb(224.0 / 255.0, 49.0 / 255.0, 49.0 / 255.0);
        assert_eq!(
            match_color(&channels),
            ColorMatch::Exact(vec![PaletteColor::PoppyRed])
        );
    }

    #[test]
    fn test_serialized_noise_is_absorbed() {
        let channels = rgb(0.8784313725490196, 0.19215686274509805, 0.19215686274509799);
        assert_eq!(match_exact(&channels), vec![PaletteColor::PoppyRed]);
    }

    #[test]
    fn test_secondary_triple_matches() {
        let channels = rgb(69.0 / 255.0, 106.0 / 255.0, 168.0 / 255.0);
        assert_eq!(match_exact(&channels), vec![PaletteColor::ConfidentOrange]);
    }

    #[test]
    fn test_out_of_range_blue_matches_at_three_decimals() {
        let channels = rgb(244.0 / 255.0, 248.0 / 255.0, 1.0431372549019609);
        assert_eq!(match_exact(&channels), vec![PaletteColor::Lemonade]);
    }

    #[test]
    fn test_white_channel_matches_achromatic_entry() {
        assert_eq!(
            match_color(&white(0.6)),
            ColorMatch::Exact(vec![PaletteColor::Ash])
        );
    }

    #[test]
    fn test_achromatic_red_rule_ignores_other_channels() {
        // Red 1.0 matches white through the achromatic red rule, and the full
        // triple matches confidentOrange; both are reported.
        let channels = rgb(1.0, 84.0 / 255.0, 15.0 / 255.0);
        assert_eq!(
            match_exact(&channels),
            vec![PaletteColor::ConfidentOrange, PaletteColor::White]
        );
    }

    #[test]
    fn test_alpha_not_one_is_unmatched() {
        let mut channels = rgb(224.0 / 255.0, 49.0 / 255.0, 49.0 / 255.0);
        channels.alpha = Some(0.5);
        assert_eq!(match_color(&channels), ColorMatch::Unmatched);
        channels.alpha = None;
        assert_eq!(match_color(&channels), ColorMatch::Unmatched);
    }

    #[test]
    fn test_gray_fallback_for_equal_channels() {
        let channels = rgb(0.5, 0.5, 0.5);
        assert_eq!(
            match_color(&channels),
            ColorMatch::NearestGray(PaletteColor::Ash)
        );
    }

    #[test]
    fn test_gray_fallback_for_white_channel() {
        assert_eq!(
            match_color(&white(0.93)),
            ColorMatch::NearestGray(PaletteColor::Lightgray)
        );
    }

    #[test]
    fn test_non_gray_unmatched() {
        let channels = rgb(0.1, 0.5, 0.9);
        assert_eq!(match_color(&channels), ColorMatch::Unmatched);
        assert!(match_color(&channels).colors().is_empty());
    }

    #[test]
    fn test_nearest_gray_extremes() {
        assert_eq!(nearest_gray(0.0), Some(PaletteColor::Black));
        assert_eq!(nearest_gray(1.0), Some(PaletteColor::White));
    }

    #[test]
    fn test_nearest_gray_picks_closest() {
        // ash 0.6, charcoal 0.4, gray 0.839, lightgray 0.961
        assert_eq!(nearest_gray(0.45), Some(PaletteColor::Charcoal));
        assert_eq!(nearest_gray(0.85), Some(PaletteColor::Gray));
        assert_eq!(nearest_gray(0.99), Some(PaletteColor::Lightgray));
        assert_eq!(nearest_gray(0.01), Some(PaletteColor::Charcoal));
    }

    #[test]
    fn test_nearest_gray_tie_goes_to_first_declared() {
        // Exactly halfway between charcoal (102) and ash (153).
        let midpoint = 127.5 / 255.0;
        assert_eq!(nearest_gray(midpoint), Some(PaletteColor::Ash));
    }

    #[test]
    fn test_is_grayscale_requires_channels() {
        let empty = ColorChannels {
            alpha: Some(1.0),
            ..ColorChannels::default()
        };
        assert!(!empty.is_grayscale());
        assert_eq!(match_color(&empty), ColorMatch::Unmatched);
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(to_hex_string(Some(1.0), Some(0.0), Some(0.5)), "#ff007f");
        assert_eq!(to_hex_string(None, Some(2.0), None), "#00ff00");
    }

    #[test]
    fn test_hex_string_truncates() {
        assert_eq!(to_rgb8(0.1), 25);
        assert_eq!(to_hex_string(Some(0.1), Some(0.1), Some(0.1)), "#191919");
    }
}
