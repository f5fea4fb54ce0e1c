//! In-place edits on layout document elements.
//!
//! Every mutation the processor performs goes through here, with explicit
//! before/after attribute sets:
//! - rewriting a matched color node to a named color reference
//! - synthesizing a default background color for cell content views
//! - declaring named colors in the resource table

pub(crate) mod mutation;

pub use mutation::{
    declare_named_color, declares_named_color, ensure_background_color, rewrite_color_node,
};

/// Tag-name fragment identifying color nodes (case-sensitive).
pub const COLOR_TAG: &str = "color";

/// Tag-name fragment identifying table view cell content views.
pub const CELL_CONTENT_VIEW_TAG: &str = "tableViewCellContentView";

/// `key` of a view's background color node.
pub const BACKGROUND_COLOR_KEY: &str = "backgroundColor";

/// Resource-table element declaring one named color.
pub const NAMED_COLOR_ELEMENT: &str = "namedColor";
