/*
 * test_cli_files.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * File-based input and output through the command-line runner.
 */

use pubfilter::cli::{FilterArgs, run};
use pubfilter::filters::FilterKind;
use serde_json::{Value, json};
use std::fs;

#[test]
fn test_run_reads_and_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    fs::write(
        &input,
        json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [
                {"t": "Div", "c": [["", ["boxed"], []], [
                    {"t": "CodeBlock", "c": [["", ["diagram"], []], "\\draw;"]}
                ]]}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let args = FilterArgs {
        format: Some("latex".to_string()),
        input: Some(input),
        output: Some(output.clone()),
        ..Default::default()
    };
    run(&FilterKind::ALL, &args).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written["blocks"],
        json!([
            {"t": "RawBlock", "c": ["latex", "\\begin{boxed}"]},
            {"t": "RawBlock", "c": ["latex", "\\begin{tikzpicture}[domain=0:4]\n\\draw;\n\\end{tikzpicture}"]},
            {"t": "RawBlock", "c": ["latex", "\\end{boxed}"]}
        ])
    );
}

#[test]
fn test_run_fails_on_invalid_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    fs::write(&input, "{\"blocks\": []}").unwrap();

    let args = FilterArgs {
        input: Some(input),
        output: Some(dir.path().join("out.json")),
        ..Default::default()
    };
    let err = run(&[FilterKind::Container], &args).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to read document: Missing required field: meta"
    );
}
