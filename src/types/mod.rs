//! Data types for layout documents and processing results.

mod document;
mod node;
mod report;

pub use document::*;
pub use node::*;
pub use report::*;
