/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Writer for Pandoc's JSON serialization. Inverse of `readers::json`.

use pubfilter_types::{
    Alignment, Attr, Block, Caption, Cell, Citation, CitationMode, ColWidth, Inline, Inlines,
    ListAttributes, ListNumberDelim, ListNumberStyle, MathType, Meta, MetaValue, Pandoc,
    QuoteType, Row, Table,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Top-level Pandoc JSON document structure.
/// Field order matches the order Pandoc itself writes.
#[derive(Serialize)]
struct PandocDocumentJson<'a> {
    #[serde(rename = "pandoc-api-version")]
    pandoc_api_version: &'a [u64],
    meta: Value,
    blocks: Vec<Value>,
}

pub fn write<W: std::io::Write>(pandoc: &Pandoc, writer: &mut W) -> std::io::Result<()> {
    let document = PandocDocumentJson {
        pandoc_api_version: &pandoc.api_version,
        meta: write_meta(&pandoc.meta),
        blocks: write_blocks(&pandoc.blocks),
    };
    serde_json::to_writer(&mut *writer, &document)?;
    writer.flush()
}

/// Serialize a whole document into a `Value`.
pub fn to_value(pandoc: &Pandoc) -> Value {
    json!({
        "pandoc-api-version": pandoc.api_version,
        "meta": write_meta(&pandoc.meta),
        "blocks": write_blocks(&pandoc.blocks),
    })
}

fn node(t: &str, c: Value) -> Value {
    json!({ "t": t, "c": c })
}

fn unit(t: &str) -> Value {
    json!({ "t": t })
}

fn write_attr(attr: &Attr) -> Value {
    json!([
        attr.0, // id
        attr.1, // classes
        // key-value pairs
        attr.2
            .iter()
            .map(|(k, v)| json!([k, v]))
            .collect::<Vec<_>>()
    ])
}

// ============================================================================
// Inlines
// ============================================================================

pub fn write_inlines(inlines: &Inlines) -> Value {
    Value::Array(inlines.iter().map(write_inline).collect())
}

fn write_citation(citation: &Citation) -> Value {
    let mode = match citation.mode {
        CitationMode::AuthorInText => "AuthorInText",
        CitationMode::SuppressAuthor => "SuppressAuthor",
        CitationMode::NormalCitation => "NormalCitation",
    };
    json!({
        "citationId": citation.id,
        "citationPrefix": write_inlines(&citation.prefix),
        "citationSuffix": write_inlines(&citation.suffix),
        "citationMode": unit(mode),
        "citationNoteNum": citation.note_num,
        "citationHash": citation.hash,
    })
}

fn write_inline(inline: &Inline) -> Value {
    match inline {
        Inline::Str(s) => node("Str", json!(s.text)),
        Inline::Emph(e) => node("Emph", write_inlines(&e.content)),
        Inline::Underline(u) => node("Underline", write_inlines(&u.content)),
        Inline::Strong(s) => node("Strong", write_inlines(&s.content)),
        Inline::Strikeout(s) => node("Strikeout", write_inlines(&s.content)),
        Inline::Superscript(s) => node("Superscript", write_inlines(&s.content)),
        Inline::Subscript(s) => node("Subscript", write_inlines(&s.content)),
        Inline::SmallCaps(s) => node("SmallCaps", write_inlines(&s.content)),
        Inline::Quoted(q) => {
            let quote_type = match q.quote_type {
                QuoteType::SingleQuote => "SingleQuote",
                QuoteType::DoubleQuote => "DoubleQuote",
            };
            node(
                "Quoted",
                json!([unit(quote_type), write_inlines(&q.content)]),
            )
        }
        Inline::Cite(c) => node(
            "Cite",
            json!([
                c.citations.iter().map(write_citation).collect::<Vec<_>>(),
                write_inlines(&c.content)
            ]),
        ),
        Inline::Code(c) => node("Code", json!([write_attr(&c.attr), c.text])),
        Inline::Space => unit("Space"),
        Inline::SoftBreak => unit("SoftBreak"),
        Inline::LineBreak => unit("LineBreak"),
        Inline::Math(m) => {
            let math_type = match m.math_type {
                MathType::InlineMath => "InlineMath",
                MathType::DisplayMath => "DisplayMath",
            };
            node("Math", json!([unit(math_type), m.text]))
        }
        Inline::RawInline(r) => node("RawInline", json!([r.format, r.text])),
        Inline::Link(l) => node(
            "Link",
            json!([
                write_attr(&l.attr),
                write_inlines(&l.content),
                [l.target.0, l.target.1]
            ]),
        ),
        Inline::Image(i) => node(
            "Image",
            json!([
                write_attr(&i.attr),
                write_inlines(&i.content),
                [i.target.0, i.target.1]
            ]),
        ),
        Inline::Note(n) => node("Note", Value::Array(write_blocks(&n.content))),
        Inline::Span(s) => node(
            "Span",
            json!([write_attr(&s.attr), write_inlines(&s.content)]),
        ),
        Inline::Unknown(value) => value.clone(),
    }
}

// ============================================================================
// Blocks
// ============================================================================

pub fn write_blocks(blocks: &[Block]) -> Vec<Value> {
    blocks.iter().map(write_block).collect()
}

fn write_blockss(items: &[Vec<Block>]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|blocks| Value::Array(write_blocks(blocks)))
            .collect(),
    )
}

fn write_list_attributes(attr: &ListAttributes) -> Value {
    let style = match attr.1 {
        ListNumberStyle::Default => "DefaultStyle",
        ListNumberStyle::Example => "Example",
        ListNumberStyle::Decimal => "Decimal",
        ListNumberStyle::LowerRoman => "LowerRoman",
        ListNumberStyle::UpperRoman => "UpperRoman",
        ListNumberStyle::LowerAlpha => "LowerAlpha",
        ListNumberStyle::UpperAlpha => "UpperAlpha",
    };
    let delim = match attr.2 {
        ListNumberDelim::Default => "DefaultDelim",
        ListNumberDelim::Period => "Period",
        ListNumberDelim::OneParen => "OneParen",
        ListNumberDelim::TwoParens => "TwoParens",
    };
    json!([attr.0, unit(style), unit(delim)])
}

fn write_caption(caption: &Caption) -> Value {
    let short = match &caption.short {
        Some(inlines) => write_inlines(inlines),
        None => Value::Null,
    };
    json!([short, write_blocks(&caption.long)])
}

fn write_alignment(alignment: &Alignment) -> Value {
    unit(match alignment {
        Alignment::Left => "AlignLeft",
        Alignment::Center => "AlignCenter",
        Alignment::Right => "AlignRight",
        Alignment::Default => "AlignDefault",
    })
}

fn write_colwidth(width: &ColWidth) -> Value {
    match width {
        ColWidth::Default => unit("ColWidthDefault"),
        ColWidth::Percentage(w) => node("ColWidth", json!(w)),
    }
}

fn write_cell(cell: &Cell) -> Value {
    json!([
        write_attr(&cell.attr),
        write_alignment(&cell.alignment),
        cell.row_span,
        cell.col_span,
        write_blocks(&cell.content)
    ])
}

fn write_rows(rows: &[Row]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| {
                json!([
                    write_attr(&row.attr),
                    row.cells.iter().map(write_cell).collect::<Vec<_>>()
                ])
            })
            .collect(),
    )
}

fn write_table(table: &Table) -> Value {
    let colspec = table
        .colspec
        .iter()
        .map(|(alignment, width)| json!([write_alignment(alignment), write_colwidth(width)]))
        .collect::<Vec<_>>();
    let bodies = table
        .bodies
        .iter()
        .map(|body| {
            json!([
                write_attr(&body.attr),
                body.rowhead_columns,
                write_rows(&body.head),
                write_rows(&body.body)
            ])
        })
        .collect::<Vec<_>>();
    json!([
        write_attr(&table.attr),
        write_caption(&table.caption),
        colspec,
        [write_attr(&table.head.attr), write_rows(&table.head.rows)],
        bodies,
        [write_attr(&table.foot.attr), write_rows(&table.foot.rows)]
    ])
}

fn write_block(block: &Block) -> Value {
    match block {
        Block::Plain(p) => node("Plain", write_inlines(&p.content)),
        Block::Paragraph(p) => node("Para", write_inlines(&p.content)),
        Block::LineBlock(l) => node(
            "LineBlock",
            Value::Array(l.content.iter().map(write_inlines).collect()),
        ),
        Block::CodeBlock(c) => node("CodeBlock", json!([write_attr(&c.attr), c.text])),
        Block::RawBlock(r) => node("RawBlock", json!([r.format, r.text])),
        Block::BlockQuote(b) => node("BlockQuote", Value::Array(write_blocks(&b.content))),
        Block::OrderedList(o) => node(
            "OrderedList",
            json!([write_list_attributes(&o.attr), write_blockss(&o.content)]),
        ),
        Block::BulletList(b) => node("BulletList", write_blockss(&b.content)),
        Block::DefinitionList(d) => node(
            "DefinitionList",
            Value::Array(
                d.content
                    .iter()
                    .map(|(term, definitions)| {
                        json!([write_inlines(term), write_blockss(definitions)])
                    })
                    .collect(),
            ),
        ),
        Block::Header(h) => node(
            "Header",
            json!([h.level, write_attr(&h.attr), write_inlines(&h.content)]),
        ),
        Block::HorizontalRule => unit("HorizontalRule"),
        Block::Table(t) => node("Table", write_table(t)),
        Block::Figure(f) => node(
            "Figure",
            json!([
                write_attr(&f.attr),
                write_caption(&f.caption),
                write_blocks(&f.content)
            ]),
        ),
        Block::Div(d) => node(
            "Div",
            json!([write_attr(&d.attr), write_blocks(&d.content)]),
        ),
        Block::Unknown(value) => value.clone(),
    }
}

// ============================================================================
// Metadata
// ============================================================================

fn write_meta(meta: &Meta) -> Value {
    Value::Object(
        meta.iter()
            .map(|(key, value)| (key.clone(), write_meta_value(value)))
            .collect::<Map<_, _>>(),
    )
}

fn write_meta_value(value: &MetaValue) -> Value {
    match value {
        MetaValue::MetaMap(map) => node("MetaMap", write_meta(map)),
        MetaValue::MetaList(items) => node(
            "MetaList",
            Value::Array(items.iter().map(write_meta_value).collect()),
        ),
        MetaValue::MetaBool(b) => node("MetaBool", json!(b)),
        MetaValue::MetaString(s) => node("MetaString", json!(s)),
        MetaValue::MetaInlines(inlines) => node("MetaInlines", write_inlines(inlines)),
        MetaValue::MetaBlocks(blocks) => node("MetaBlocks", Value::Array(write_blocks(blocks))),
        MetaValue::Unknown(value) => value.clone(),
    }
}
