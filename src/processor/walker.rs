//! Pre-order traversal that rewrites color nodes and fills in cell backgrounds.

use log::debug;

use crate::color::{match_color, to_hex_string, to_rgb8, ColorChannels, ColorMatch};
use crate::editor::{
    ensure_background_color, rewrite_color_node, CELL_CONTENT_VIEW_TAG, COLOR_TAG,
};
use crate::types::{Element, ProcessReport, UnmatchedColor, UsedColorSet};
use crate::xml_helpers::attr_string;

use super::ProcessOptions;

/// Walks one document, recording every substituted color in `used`.
pub(crate) struct TreeWalker<'a> {
    options: &'a ProcessOptions,
    used: &'a mut UsedColorSet,
    report: &'a mut ProcessReport,
}

impl<'a> TreeWalker<'a> {
    pub(crate) fn new(
        options: &'a ProcessOptions,
        used: &'a mut UsedColorSet,
        report: &'a mut ProcessReport,
    ) -> Self {
        Self {
            options,
            used,
            report,
        }
    }

    /// Visit `element` and then its descendants, in document order.
    ///
    /// Both tag tests run on every element; children are always visited.
    pub(crate) fn visit(&mut self, element: &mut Element) {
        if element.name.contains(COLOR_TAG) {
            self.visit_color(element);
        }

        if element.name.contains(CELL_CONTENT_VIEW_TAG)
            && ensure_background_color(element, self.options.default_background)
        {
            debug!(
                "added {} background to <{}>",
                self.options.default_background, element.name
            );
            self.report.injected_backgrounds += 1;
        }

        for child in element.child_elements_mut() {
            self.visit(child);
        }
    }

    fn visit_color(&mut self, element: &mut Element) {
        let channels = ColorChannels::from_element(element);
        let matched = match_color(&channels);

        if matched == ColorMatch::Unmatched {
            if channels.is_opaque() && self.options.collect_unmatched {
                self.report
                    .unmatched
                    .push(unmatched_color(element, &channels));
            }
            return;
        }

        // Each match rewrites the node again; the last one applied is what stays.
        let mut rewritten = false;
        for &color in matched.colors() {
            rewritten |= rewrite_color_node(element, color);
            self.used.insert(color);
        }

        if rewritten {
            debug!("rewrote <{}> to {:?}", element.name, matched);
            self.report.rewritten += 1;
        }
    }
}

fn unmatched_color(element: &Element, channels: &ColorChannels) -> UnmatchedColor {
    UnmatchedColor {
        key: attr_string(element, "key"),
        red: channels.red.map(to_rgb8),
        green: channels.green.map(to_rgb8),
        blue: channels.blue.map(to_rgb8),
        white: channels.white.map(to_rgb8),
        hex: match channels.white {
            Some(w) => to_hex_string(Some(w), Some(w), Some(w)),
            None => to_hex_string(channels.red, channels.green, channels.blue),
        },
    }
}
