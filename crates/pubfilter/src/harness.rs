/*
 * harness.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Read a Pandoc JSON document, run filters over it, write it back.

use crate::errors::{FilterError, Result};
use crate::filter_context::FilterContext;
use crate::format::OutputFormat;
use crate::options::FilterOptions;
use crate::readers;
use crate::traversals::{BlockFilter, apply_filter};
use crate::writers;
use pubfilter_types::Pandoc;

/// Apply `filters` to `pandoc` as sequential whole-document passes.
pub fn run_filters(
    pandoc: Pandoc,
    filters: &[Box<dyn BlockFilter>],
    format: &OutputFormat,
    options: &FilterOptions,
) -> Pandoc {
    let ctx = FilterContext::new(format.clone()).with_options(options.clone());
    filters
        .iter()
        .fold(pandoc, |doc, filter| apply_filter(doc, filter.as_ref(), &ctx))
}

/// Filter a serialized document from `input` into `output`.
pub fn filter_json<R: std::io::Read, W: std::io::Write>(
    input: &mut R,
    output: &mut W,
    filters: &[Box<dyn BlockFilter>],
    format: &OutputFormat,
    options: &FilterOptions,
) -> Result<()> {
    let pandoc = readers::json::read(input)?;
    tracing::info!(
        format = %format,
        blocks = pandoc.blocks.len(),
        filters = ?filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
        "filtering document"
    );
    let filtered = run_filters(pandoc, filters, format, options);
    writers::json::write(&filtered, output).map_err(FilterError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterKind;
    use serde_json::{Value, json};

    fn all_filters() -> Vec<Box<dyn BlockFilter>> {
        FilterKind::ALL.iter().map(|kind| kind.build()).collect()
    }

    fn filter_str(input: &str, format: &str) -> Result<Value> {
        let mut out = Vec::new();
        filter_json(
            &mut input.as_bytes(),
            &mut out,
            &all_filters(),
            &OutputFormat::from(format),
            &FilterOptions::default(),
        )?;
        Ok(serde_json::from_slice(&out).expect("writer produced JSON"))
    }

    #[test]
    fn test_filter_json_rewrites_div_and_diagram() {
        let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[
            {"t":"Div","c":[["",["note"],[]],[{"t":"CodeBlock","c":[["",["diagram"],[]],"x"]}]]}
        ]}"#;
        let out = filter_str(input, "latex").unwrap();
        assert_eq!(
            out["blocks"],
            json!([
                {"t": "RawBlock", "c": ["latex", "\\begin{note}"]},
                {"t": "RawBlock", "c": ["latex", "\\begin{tikzpicture}[domain=0:4]\nx\n\\end{tikzpicture}"]},
                {"t": "RawBlock", "c": ["latex", "\\end{note}"]}
            ])
        );
    }

    #[test]
    fn test_filter_json_reports_malformed_input() {
        let err = filter_str("[]", "latex").unwrap_err();
        assert!(matches!(err, FilterError::Read(_)));
        assert_eq!(
            err.to_string(),
            "Failed to read document: Invalid type: Expected object for Pandoc"
        );
    }

    #[test]
    fn test_run_filters_with_no_filters_is_identity() {
        let pandoc = Pandoc::default();
        let out = run_filters(
            pandoc.clone(),
            &[],
            &OutputFormat::from("latex"),
            &FilterOptions::default(),
        );
        assert_eq!(out, pandoc);
    }
}
