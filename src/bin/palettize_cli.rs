//! CLI tool for palettize - rewrites inline colors to named palette colors
//!
//! Usage:
//!   palettize_cli                                  # storyboard/ and xib/ in the cwd
//!   palettize_cli App/Base.lproj                   # print rewritten documents
//!   palettize_cli App -i --skip-declared           # rewrite in place, safe to re-run
//!   palettize_cli App --report colors.json         # also write a JSON report

#![allow(clippy::exit)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::{info, warn};

use palettize::discovery::{discover, load_sources, DEFAULT_EXTENSIONS, DEFAULT_ROOTS};
use palettize::export::reports_to_json;
use palettize::logging::{init_logging, LoggingConfig};
use palettize::{process_source, PaletteColor, ProcessOptions, ProcessReport, Processor};

#[derive(Parser, Debug)]
#[command(name = "palettize_cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Layout files or directories to search (default: storyboard/ and xib/)
    paths: Vec<PathBuf>,

    /// File extensions to pick up when walking directories
    #[arg(short = 'e', long = "extension")]
    extensions: Vec<String>,

    /// Write rewritten documents back instead of printing them
    #[arg(short = 'i', long = "in-place", action = ArgAction::SetTrue)]
    in_place: bool,

    /// Write a JSON report of every processed document to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Palette color given to cell content views without a background
    #[arg(long = "default-background", default_value = "white", value_parser = parse_palette_color)]
    default_background: PaletteColor,

    /// Do not declare colors the resource table already declares
    #[arg(long = "skip-declared", action = ArgAction::SetTrue)]
    skip_declared: bool,

    /// Add a resource table to documents that have none
    #[arg(long = "create-resources", action = ArgAction::SetTrue)]
    create_resources: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn parse_palette_color(s: &str) -> Result<PaletteColor, String> {
    s.parse().map_err(|e: palettize::error::PalettizeError| e.to_string())
}

fn main() {
    let args = Args::parse();

    init_logging(LoggingConfig {
        default_level: if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        },
        ..LoggingConfig::default()
    });

    let roots = if args.paths.is_empty() {
        DEFAULT_ROOTS.iter().map(|r| PathBuf::from(*r)).collect()
    } else {
        args.paths
    };
    let extensions = if args.extensions.is_empty() {
        DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
    } else {
        args.extensions
    };

    // Discovery failure aborts the whole run
    let paths = match discover(&roots, &extensions) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut processor = Processor::new(ProcessOptions {
        default_background: args.default_background,
        skip_declared_resources: args.skip_declared,
        create_resources: args.create_resources,
        ..ProcessOptions::default()
    });

    let mut reports: Vec<ProcessReport> = Vec::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for source in load_sources(&paths) {
        let name = source.display_name();
        let processed = match process_source(&source.text, &mut processor) {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping {}: {e}", source.path.display());
                continue;
            }
        };

        info!(
            "{name}: {} rewritten, {} background(s) added, {} color(s) declared",
            processed.report.rewritten,
            processed.report.injected_backgrounds,
            processed.report.declared_colors.len()
        );

        if args.in_place {
            if let Err(e) = fs::write(&source.path, &processed.text) {
                eprintln!("Error writing {}: {}", source.path.display(), e);
                std::process::exit(1);
            }
        } else if let Err(e) = write!(
            out,
            "-----------------{name}-----------------\n{}",
            processed.text
        ) {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }

        let mut report = processed.report;
        report.source = Some(source.path.display().to_string());
        reports.push(report);
    }

    if let Some(path) = args.report {
        let json = match reports_to_json(&reports) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(&path, json) {
            eprintln!("Error writing {}: {}", path.display(), e);
            std::process::exit(1);
        }
        eprintln!("Written: {}", path.display());
    }
}
