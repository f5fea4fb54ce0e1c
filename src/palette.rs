//! Design-system palette
//!
//! A fixed, ordered table of named colors. Declaration order matters: it is
//! the iteration order for matching (the last match wins when several entries
//! match one node) and the tie-break order for the nearest-gray fallback.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PalettizeError;

/// A named palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PaletteColor {
    Ash,
    Black,
    Charcoal,
    ConfidentOrange,
    Gray,
    Latte,
    Lemonade,
    Lightgray,
    PoppyRed,
    WarmYellow,
    White,
}

/// An 8-bit RGB triple as declared by the design system.
///
/// Components are `u16` because some declared values sit above 255 on purpose
/// (they still compare equal at three decimals to the stored value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Rgb8 {
    const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Red channel in normalized `[0, 1]` space.
    pub fn red(self) -> f64 {
        f64::from(self.red) / 255.0
    }

    pub fn green(self) -> f64 {
        f64::from(self.green) / 255.0
    }

    pub fn blue(self) -> f64 {
        f64::from(self.blue) / 255.0
    }
}

/// One palette record: identifier, classification, and canonical triples.
#[derive(Debug, Clone, Copy)]
pub struct PaletteEntry {
    pub color: PaletteColor,
    /// Gray/black/white family, by design intent.
    pub achromatic: bool,
    /// Strict gray subset used by the nearest-gray fallback.
    pub gray: bool,
    pub triples: &'static [Rgb8],
}

static PALETTE: [PaletteEntry; 11] = [
    PaletteEntry {
        color: PaletteColor::Ash,
        achromatic: true,
        gray: true,
        triples: &[Rgb8::new(153, 153, 153)],
    },
    PaletteEntry {
        color: PaletteColor::Black,
        achromatic: true,
        gray: false,
        triples: &[Rgb8::new(0, 0, 0)],
    },
    PaletteEntry {
        color: PaletteColor::Charcoal,
        achromatic: true,
        gray: true,
        triples: &[Rgb8::new(102, 102, 102)],
    },
    PaletteEntry {
        color: PaletteColor::ConfidentOrange,
        achromatic: false,
        gray: false,
        triples: &[
            Rgb8::new(255, 84, 15),
            Rgb8::new(69, 106, 168),
            Rgb8::new(255, 115, 115),
            Rgb8::new(255, 106, 106),
        ],
    },
    PaletteEntry {
        color: PaletteColor::Gray,
        achromatic: true,
        gray: true,
        triples: &[Rgb8::new(214, 214, 214)],
    },
    PaletteEntry {
        color: PaletteColor::Latte,
        achromatic: false,
        gray: false,
        triples: &[Rgb8::new(191, 134, 80)],
    },
    PaletteEntry {
        color: PaletteColor::Lemonade,
        achromatic: false,
        gray: false,
        triples: &[
            Rgb8::new(244, 248, 266),
            Rgb8::new(255, 240, 240),
            Rgb8::new(255, 247, 224),
        ],
    },
    PaletteEntry {
        color: PaletteColor::Lightgray,
        achromatic: true,
        gray: true,
        triples: &[Rgb8::new(245, 245, 245)],
    },
    PaletteEntry {
        color: PaletteColor::PoppyRed,
        achromatic: false,
        gray: false,
        triples: &[Rgb8::new(224, 49, 49)],
    },
    PaletteEntry {
        color: PaletteColor::WarmYellow,
        achromatic: false,
        gray: false,
        triples: &[Rgb8::new(255, 210, 103)],
    },
    PaletteEntry {
        color: PaletteColor::White,
        achromatic: true,
        gray: false,
        triples: &[Rgb8::new(255, 255, 255)],
    },
];

/// All palette entries in declaration order.
pub fn lookup() -> &'static [PaletteEntry] {
    &PALETTE
}

/// Entries eligible for the nearest-gray fallback, in declaration order.
pub fn gray_subset() -> impl Iterator<Item = &'static PaletteEntry> {
    PALETTE.iter().filter(|e| e.gray)
}

impl PaletteColor {
    /// Every color, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Ash,
        Self::Black,
        Self::Charcoal,
        Self::ConfidentOrange,
        Self::Gray,
        Self::Latte,
        Self::Lemonade,
        Self::Lightgray,
        Self::PoppyRed,
        Self::WarmYellow,
        Self::White,
    ];

    /// The identifier written into `name` attributes and resource entries.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ash => "ash",
            Self::Black => "black",
            Self::Charcoal => "charcoal",
            Self::ConfidentOrange => "confidentOrange",
            Self::Gray => "gray",
            Self::Latte => "latte",
            Self::Lemonade => "lemonade",
            Self::Lightgray => "lightgray",
            Self::PoppyRed => "poppyRed",
            Self::WarmYellow => "warmYellow",
            Self::White => "white",
        }
    }

    /// The palette record for this color.
    pub fn entry(self) -> Option<&'static PaletteEntry> {
        PALETTE.iter().find(|e| e.color == self)
    }

    pub fn is_achromatic(self) -> bool {
        self.entry().is_some_and(|e| e.achromatic)
    }

    pub fn is_gray(self) -> bool {
        self.entry().is_some_and(|e| e.gray)
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteColor {
    type Err = PalettizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| PalettizeError::Other(format!("unknown palette color: {s}")))
    }
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

    #[test]
    fn test_palette_order_matches_enum() {
        let order: Vec<PaletteColor> = lookup().iter().map(|e| e.color).collect();
        assert_eq!(order, PaletteColor::ALL.to_vec());
    }

    #[test]
    fn test_gray_subset_excludes_black_and_white() {
        let grays: Vec<PaletteColor> = gray_subset().map(|e| e.color).collect();
        assert_eq!(
            grays,
            vec![
                PaletteColor::Ash,
                PaletteColor::Charcoal,
                PaletteColor::Gray,
                PaletteColor::Lightgray
            ]
        );
        assert!(PaletteColor::Black.is_achromatic());
        assert!(!PaletteColor::Black.is_gray());
        assert!(PaletteColor::White.is_achromatic());
        assert!(!PaletteColor::White.is_gray());
    }

    #[test]
    fn test_chromatic_entries_are_not_achromatic() {
        for color in [
            PaletteColor::ConfidentOrange,
            PaletteColor::Latte,
            PaletteColor::Lemonade,
            PaletteColor::PoppyRed,
            PaletteColor::WarmYellow,
        ] {
            assert!(!color.is_achromatic(), "{color} should be chromatic");
            assert!(!color.is_gray(), "{color} should not be gray");
        }
    }

    #[test]
    fn test_every_entry_has_a_triple() {
        for entry in lookup() {
            assert!(!entry.triples.is_empty(), "{} has no triples", entry.color);
        }
    }

    #[test]
    fn test_name_roundtrip() {
        for color in PaletteColor::ALL {
            assert_eq!(color.name().parse::<PaletteColor>().unwrap(), color);
            assert_eq!(color.to_string(), color.name());
        }
        assert!("magenta".parse::<PaletteColor>().is_err());
    }

    #[test]
    fn test_serde_uses_raw_name() {
        let json = serde_json::to_string(&PaletteColor::ConfidentOrange).unwrap();
        assert_eq!(json, "\"confidentOrange\"");
    }

    #[test]
    fn test_out_of_range_component_is_kept() {
        let lemonade = PaletteColor::Lemonade.entry().unwrap();
        assert_eq!(lemonade.triples[0].blue, 266);
        assert!(lemonade.triples[0].blue() > 1.0);
    }
}
