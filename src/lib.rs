//! palettize - named palette colors for storyboard and xib files
//!
//! Scans UI layout documents for inline color definitions and replaces them
//! with references to a fixed design-system palette:
//! - exact matches on RGB, or on the white/red channel for achromatic colors
//! - nearest-gray fallback for grayscale colors with no exact match
//! - a default background for table view cell content views that lack one
//! - one `namedColor` declaration per used color in the resource table
//!
//! # Usage
//!
//! ```no_run
//! use palettize::{parse_document, serialize, Processor, ProcessOptions};
//!
//! # fn main() -> palettize::error::Result<()> {
//! let text = std::fs::read_to_string("Main.storyboard")?;
//! let mut document = parse_document(&text)?;
//! let mut processor = Processor::new(ProcessOptions::default());
//! let report = processor.process(&mut document);
//! println!("{}", serialize(&document)?);
//! eprintln!("{} color(s) rewritten", report.rewritten);
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod discovery;
pub mod editor;
pub mod error;
pub mod export;
pub mod logging;
pub mod palette;
pub mod parser;
pub mod processor;
pub mod types;
pub mod xml_helpers;

pub use export::write_document as serialize;
pub use palette::PaletteColor;
pub use parser::parse_document;
pub use processor::{process_document, process_source, ProcessOptions, ProcessedSource, Processor};
pub use types::*;
