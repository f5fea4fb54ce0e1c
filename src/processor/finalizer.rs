//! Flushes the used colors of one document into its resource table.

use log::{debug, warn};

use crate::editor::{declare_named_color, declares_named_color};
use crate::palette::PaletteColor;
use crate::types::{Document, UsedColorSet};

use super::ProcessOptions;

/// Append one `namedColor` entry per used color and empty `used`.
///
/// Returns the colors actually appended. `used` is always left empty, even
/// when the document has nowhere to put the entries.
pub(crate) fn finalize(
    document: &mut Document,
    used: &mut UsedColorSet,
    options: &ProcessOptions,
) -> Vec<PaletteColor> {
    let colors = used.drain();
    if colors.is_empty() {
        return Vec::new();
    }

    let resources = if options.create_resources {
        document.resources_or_insert()
    } else {
        document.resources_mut()
    };
    let Some(resources) = resources else {
        warn!(
            "no resource table, {} named color(s) not declared",
            colors.len()
        );
        return Vec::new();
    };

    let mut declared = Vec::with_capacity(colors.len());
    for color in colors {
        if options.skip_declared_resources && declares_named_color(resources, color) {
            debug!("{color} already declared");
            continue;
        }
        declare_named_color(resources, color);
        declared.push(color);
    }
    declared
}
