/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command-line surface shared by the filter executables.
//!
//! Pandoc runs a JSON filter as `<filter> FORMAT`, feeding the document on
//! stdin and reading the filtered document from stdout. Logging therefore
//! goes to stderr.

use crate::filters::FilterKind;
use crate::format::OutputFormat;
use crate::harness;
use crate::options::FilterOptions;
use anyhow::{Context, Result};
use clap::{Args, Parser};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Arguments common to every filter executable.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Output format being rendered (passed by pandoc)
    pub format: Option<String>,

    /// Code block class marking a diagram (repeatable, defaults to "diagram")
    #[arg(long = "diagram-class", value_name = "CLASS")]
    pub diagram_classes: Vec<String>,

    /// Read the JSON document from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the JSON document to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// `pubfilter`: run any combination of the filters in one pass.
#[derive(Parser, Debug)]
#[command(name = "pubfilter")]
#[command(version)]
#[command(about = "Pandoc JSON filter for publication output", long_about = None)]
pub struct Cli {
    /// Filter to run (repeatable, in order; defaults to all)
    #[arg(long = "filter", value_enum, value_name = "FILTER")]
    pub filters: Vec<FilterKind>,

    #[command(flatten)]
    pub args: FilterArgs,
}

/// A single-purpose filter executable.
#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Pandoc JSON filter", long_about = None)]
pub struct SingleFilterCli {
    #[command(flatten)]
    pub args: FilterArgs,
}

impl Cli {
    /// Filters to run, falling back to all of them.
    pub fn filter_kinds(&self) -> Vec<FilterKind> {
        if self.filters.is_empty() {
            FilterKind::ALL.to_vec()
        } else {
            self.filters.clone()
        }
    }
}

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pubfilter=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Run `kinds` over the document described by `args`.
pub fn run(kinds: &[FilterKind], args: &FilterArgs) -> Result<()> {
    let format = OutputFormat::from(args.format.clone());
    let options = FilterOptions::default().with_diagram_classes(args.diagram_classes.clone());
    let filters = kinds.iter().map(|kind| kind.build()).collect::<Vec<_>>();

    let mut input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Failed to open input file {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    harness::filter_json(&mut input, &mut output, &filters, &format, &options)?;
    Ok(())
}

/// Entry point of the `pubfilter` executable.
pub fn main_all() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    run(&cli.filter_kinds(), &cli.args)
}

/// Entry point of an executable dedicated to one filter.
pub fn main_single(kind: FilterKind) -> Result<()> {
    init_logging();
    let cli = SingleFilterCli::parse();
    run(&[kind], &cli.args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pandoc_style_invocation() {
        let cli = Cli::try_parse_from(["pubfilter", "latex"]).unwrap();
        assert_eq!(cli.args.format.as_deref(), Some("latex"));
        assert_eq!(cli.filter_kinds(), FilterKind::ALL.to_vec());
    }

    #[test]
    fn test_no_format_argument() {
        let cli = Cli::try_parse_from(["pubfilter"]).unwrap();
        assert!(cli.args.format.is_none());
    }

    #[test]
    fn test_filter_selection_keeps_order() {
        let cli = Cli::try_parse_from([
            "pubfilter",
            "--filter",
            "tikzblock",
            "--filter",
            "container",
            "beamer",
        ])
        .unwrap();
        assert_eq!(
            cli.filter_kinds(),
            vec![FilterKind::Diagram, FilterKind::Container]
        );
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["pubfilter", "--filter", "mermaid"]).is_err());
    }

    #[test]
    fn test_single_filter_arguments() {
        let cli = SingleFilterCli::try_parse_from([
            "tikzblock",
            "--diagram-class",
            "tikz",
            "-i",
            "in.json",
            "latex",
        ])
        .unwrap();
        assert_eq!(cli.args.diagram_classes, vec!["tikz"]);
        assert_eq!(cli.args.input, Some(PathBuf::from("in.json")));
        assert_eq!(cli.args.format.as_deref(), Some("latex"));
    }

    #[test]
    fn test_single_filter_rejects_filter_flag() {
        assert!(SingleFilterCli::try_parse_from(["boxes", "--filter", "diagram"]).is_err());
    }

    #[test]
    fn test_run_reports_missing_input_file() {
        let args = FilterArgs {
            input: Some(PathBuf::from("/nonexistent/pubfilter/input.json")),
            ..Default::default()
        };
        let err = run(&[FilterKind::Container], &args).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open input file"));
    }
}
