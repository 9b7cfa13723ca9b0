/*
 * test_diagram_filter.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for the diagram code block filter on Pandoc JSON.
 */

use pubfilter::filters::FilterKind;
use pubfilter::format::OutputFormat;
use pubfilter::harness::filter_json;
use pubfilter::options::FilterOptions;
use serde_json::{Value, json};

fn make_json_doc(blocks: Value) -> String {
    json!({"pandoc-api-version": [1, 23, 1], "meta": {}, "blocks": blocks}).to_string()
}

fn run_tikzblock(input: &str, options: &FilterOptions) -> Value {
    let mut out = Vec::new();
    filter_json(
        &mut input.as_bytes(),
        &mut out,
        &[FilterKind::Diagram.build()],
        &OutputFormat::from("latex"),
        options,
    )
    .expect("filter should succeed");
    serde_json::from_slice(&out).expect("output should be JSON")
}

fn code_block(classes: &[&str], text: &str) -> Value {
    json!({"t": "CodeBlock", "c": [["fig", classes, []], text]})
}

#[test]
fn test_document_markers_are_stripped() {
    let text = "\\documentclass{standalone}\n\\begin{document}\n\\draw (0,0) -- (4,2);\n\\end{document}\n";
    let out = run_tikzblock(
        &make_json_doc(json!([code_block(&["diagram"], text)])),
        &FilterOptions::default(),
    );
    assert_eq!(
        out["blocks"],
        json!([{"t": "RawBlock", "c": [
            "latex",
            "\\begin{tikzpicture}[domain=0:4]\n\n\\draw (0,0) -- (4,2);\n\n\\end{tikzpicture}"
        ]}])
    );
}

#[test]
fn test_content_between_markers_is_kept_verbatim() {
    let text = "\\begin{document}X\\end{document}";
    let out = run_tikzblock(
        &make_json_doc(json!([code_block(&["diagram"], text)])),
        &FilterOptions::default(),
    );
    assert_eq!(
        out["blocks"][0]["c"][1],
        json!("\\begin{tikzpicture}[domain=0:4]\nX\n\\end{tikzpicture}")
    );
}

#[test]
fn test_without_markers_whole_text_is_wrapped() {
    let text = "\\draw[->] (0,0) -- (4,0);";
    let out = run_tikzblock(
        &make_json_doc(json!([code_block(&["diagram"], text)])),
        &FilterOptions::default(),
    );
    assert_eq!(
        out["blocks"][0]["c"][1],
        json!(format!(
            "\\begin{{tikzpicture}}[domain=0:4]\n{}\n\\end{{tikzpicture}}",
            text
        ))
    );
}

#[test]
fn test_other_code_blocks_pass_through() {
    let blocks = json!([
        code_block(&["python"], "\\begin{document}print(1)\\end{document}"),
        code_block(&[], "plain"),
        {"t": "Para", "c": [{"t": "Code", "c": [["", ["diagram"], []], "inline"]}]}
    ]);
    let out = run_tikzblock(&make_json_doc(blocks.clone()), &FilterOptions::default());
    assert_eq!(out["blocks"], blocks);
}

#[test]
fn test_diagram_inside_div_is_rewritten() {
    let input = make_json_doc(json!([
        {"t": "Div", "c": [["", ["figure"], []], [code_block(&["diagram"], "x")]]}
    ]));
    let out = run_tikzblock(&input, &FilterOptions::default());
    assert_eq!(
        out["blocks"][0]["c"][1][0],
        json!({"t": "RawBlock", "c": ["latex", "\\begin{tikzpicture}[domain=0:4]\nx\n\\end{tikzpicture}"]})
    );
}

#[test]
fn test_historical_tikz_marker_when_configured() {
    let options = FilterOptions::default().with_diagram_classes(vec!["tikz".to_string()]);
    let out = run_tikzblock(
        &make_json_doc(json!([code_block(&["tikz"], "y")])),
        &options,
    );
    assert_eq!(out["blocks"][0]["t"], json!("RawBlock"));
}
