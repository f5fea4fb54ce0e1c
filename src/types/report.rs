use std::collections::BTreeSet;

use serde::Serialize;

use crate::palette::PaletteColor;

/// Palette colors substituted while walking one document.
///
/// Iterates in palette declaration order. Created empty per document and
/// drained by the finalizer, so nothing leaks into the next document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedColorSet {
    colors: BTreeSet<PaletteColor>,
}

impl UsedColorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, color: PaletteColor) -> bool {
        self.colors.insert(color)
    }

    pub fn contains(&self, color: PaletteColor) -> bool {
        self.colors.contains(&color)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = PaletteColor> + '_ {
        self.colors.iter().copied()
    }

    /// Take every color out, leaving the set empty.
    pub fn drain(&mut self) -> Vec<PaletteColor> {
        std::mem::take(&mut self.colors).into_iter().collect()
    }
}

/// An opaque color node that matched no palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Channels scaled to 0-255 (truncated), absent channels omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<u8>,
    /// `#rrggbb` built from the truncated channels, so `0.1` shows as `19`
    /// rather than a rounded `1a`. An approximation for reading, not matching.
    pub hex: String,
}

/// What processing one document changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    /// Identifier of the document (usually its path); filled in by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Color nodes rewritten to a named color.
    pub rewritten: usize,
    /// Background colors synthesized for table view cell content views.
    pub injected_backgrounds: usize,
    /// Every palette color substituted in the document.
    pub used_colors: Vec<PaletteColor>,
    /// Colors appended to the resource table.
    pub declared_colors: Vec<PaletteColor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<UnmatchedColor>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_used_set_dedups_and_keeps_palette_order() {
        let mut used = UsedColorSet::new();
        assert!(used.insert(PaletteColor::White));
        assert!(used.insert(PaletteColor::Ash));
        assert!(!used.insert(PaletteColor::White));

        assert_eq!(used.len(), 2);
        assert!(used.contains(PaletteColor::Ash));
        assert!(!used.contains(PaletteColor::Black));
        assert_eq!(
            used.iter().collect::<Vec<_>>(),
            vec![PaletteColor::Ash, PaletteColor::White]
        );
    }

    #[test]
    fn test_drain_empties_the_set() {
        let mut used = UsedColorSet::new();
        used.insert(PaletteColor::Latte);
        assert_eq!(used.drain(), vec![PaletteColor::Latte]);
        assert!(used.is_empty());
        assert_eq!(used.len(), 0);
        assert!(!used.contains(PaletteColor::Latte));
    }
}
