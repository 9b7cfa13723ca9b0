/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Reader for Pandoc's JSON serialization (pandoc-api-version 1.23).
//!
//! Nodes are `{"t": <constructor>, "c": <content>}` objects; constructors
//! without arguments omit `c`. Multi-argument constructors carry their
//! arguments as a positional array.

use pubfilter_types::{
    API_VERSION, Alignment, Attr, Block, BlockQuote, BulletList, Caption, Cell, Citation,
    CitationMode, Cite, Code, CodeBlock, ColSpec, ColWidth, DefinitionList, Div, Emph, Figure,
    Header, Image, Inline, Inlines, LineBlock, Link, ListAttributes, ListNumberDelim,
    ListNumberStyle, Math, MathType, Meta, MetaValue, Note, OrderedList, Pandoc, Paragraph,
    Plain, QuoteType, Quoted, RawBlock, RawInline, Row, SmallCaps, Span, Str, Strikeout, Strong,
    Subscript, Superscript, Table, TableBody, TableFoot, TableHead, Target, Underline,
};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonReadError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),
}

type Result<T> = std::result::Result<T, JsonReadError>;

/// Constructors of pandoc-api 1.23. Any other tag is kept as an opaque node.
const BLOCK_TAGS: &[&str] = &[
    "Plain",
    "Para",
    "LineBlock",
    "CodeBlock",
    "RawBlock",
    "BlockQuote",
    "OrderedList",
    "BulletList",
    "DefinitionList",
    "Header",
    "HorizontalRule",
    "Table",
    "Figure",
    "Div",
];

const INLINE_TAGS: &[&str] = &[
    "Str",
    "Emph",
    "Underline",
    "Strong",
    "Strikeout",
    "Superscript",
    "Subscript",
    "SmallCaps",
    "Quoted",
    "Cite",
    "Code",
    "Space",
    "SoftBreak",
    "LineBreak",
    "Math",
    "RawInline",
    "Link",
    "Image",
    "Note",
    "Span",
];

const META_TAGS: &[&str] = &[
    "MetaMap",
    "MetaList",
    "MetaBool",
    "MetaString",
    "MetaInlines",
    "MetaBlocks",
];

pub fn read<R: std::io::Read>(reader: &mut R) -> Result<Pandoc> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|e| JsonReadError::InvalidJson(serde_json::Error::io(e)))?;
    let json: Value = serde_json::from_str(&buffer)?;
    read_pandoc(&json)
}

pub fn read_pandoc(value: &Value) -> Result<Pandoc> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("Expected object for Pandoc"))?;

    let api_version = match obj.get("pandoc-api-version") {
        Some(version) => expect_array(version, "pandoc-api-version")?
            .iter()
            .map(|v| {
                v.as_u64()
                    .ok_or_else(|| invalid("pandoc-api-version entries must be integers"))
            })
            .collect::<Result<Vec<_>>>()?,
        None => API_VERSION.to_vec(),
    };

    let meta = read_meta(
        obj.get("meta")
            .ok_or_else(|| JsonReadError::MissingField("meta".to_string()))?,
    )?;
    let blocks = read_blocks(
        obj.get("blocks")
            .ok_or_else(|| JsonReadError::MissingField("blocks".to_string()))?,
    )?;

    Ok(Pandoc {
        api_version,
        meta,
        blocks,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn invalid(msg: impl Into<String>) -> JsonReadError {
    JsonReadError::InvalidType(msg.into())
}

fn expect_str(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{} must be string", what)))
}

fn expect_array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid(format!("{} must be array", what)))
}

/// Borrow a fixed-arity constructor argument array.
fn expect_tuple<'a, const N: usize>(value: &'a Value, what: &str) -> Result<&'a [Value; N]> {
    expect_array(value, what)?
        .try_into()
        .map_err(|_| invalid(format!("{} array must have {} elements", what, N)))
}

fn expect_usize(value: &Value, what: &str) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(format!("{} must be a non-negative integer", what)))
}

fn expect_i64(value: &Value, what: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid(format!("{} must be an integer", what)))
}

/// Split a node into its constructor tag and optional content.
fn read_tagged<'a>(value: &'a Value, what: &str) -> Result<(&'a str, Option<&'a Value>)> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(format!("Expected object for {}", what)))?;
    let t = obj
        .get("t")
        .and_then(|v| v.as_str())
        .ok_or_else(|| JsonReadError::MissingField("t".to_string()))?;
    Ok((t, obj.get("c")))
}

fn require_content<'a>(c: Option<&'a Value>, tag: &str) -> Result<&'a Value> {
    c.ok_or_else(|| JsonReadError::MissingField(format!("c (in {})", tag)))
}

fn read_attr(value: &Value) -> Result<Attr> {
    let [id, classes, kvs] = expect_tuple::<3>(value, "Attr")?;

    let id = expect_str(id, "Attr id")?;

    let classes = expect_array(classes, "Attr classes")?
        .iter()
        .map(|v| expect_str(v, "Class"))
        .collect::<Result<Vec<_>>>()?;

    let kvs = expect_array(kvs, "Attr key-values")?
        .iter()
        .map(|v| {
            let [key, value] = expect_tuple::<2>(v, "Key-value pair")?;
            Ok((expect_str(key, "Key")?, expect_str(value, "Value")?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((id, classes, kvs))
}

// ============================================================================
// Inlines
// ============================================================================

fn read_inlines(value: &Value) -> Result<Inlines> {
    expect_array(value, "Inlines")?
        .iter()
        .map(read_inline)
        .collect()
}

fn read_target(value: &Value) -> Result<Target> {
    let [url, title] = expect_tuple::<2>(value, "Target")?;
    Ok((expect_str(url, "Target url")?, expect_str(title, "Target title")?))
}

fn read_quote_type(value: &Value) -> Result<QuoteType> {
    match read_tagged(value, "QuoteType")?.0 {
        "SingleQuote" => Ok(QuoteType::SingleQuote),
        "DoubleQuote" => Ok(QuoteType::DoubleQuote),
        other => Err(JsonReadError::UnsupportedVariant(format!(
            "QuoteType {}",
            other
        ))),
    }
}

fn read_math_type(value: &Value) -> Result<MathType> {
    match read_tagged(value, "MathType")?.0 {
        "InlineMath" => Ok(MathType::InlineMath),
        "DisplayMath" => Ok(MathType::DisplayMath),
        other => Err(JsonReadError::UnsupportedVariant(format!(
            "MathType {}",
            other
        ))),
    }
}

fn read_citation_mode(value: &Value) -> Result<CitationMode> {
    match read_tagged(value, "CitationMode")?.0 {
        "AuthorInText" => Ok(CitationMode::AuthorInText),
        "SuppressAuthor" => Ok(CitationMode::SuppressAuthor),
        "NormalCitation" => Ok(CitationMode::NormalCitation),
        other => Err(JsonReadError::UnsupportedVariant(format!(
            "CitationMode {}",
            other
        ))),
    }
}

fn read_citation(value: &Value) -> Result<Citation> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("Expected object for Citation"))?;
    let field = |name: &str| {
        obj.get(name)
            .ok_or_else(|| JsonReadError::MissingField(name.to_string()))
    };
    Ok(Citation {
        id: expect_str(field("citationId")?, "citationId")?,
        prefix: read_inlines(field("citationPrefix")?)?,
        suffix: read_inlines(field("citationSuffix")?)?,
        mode: read_citation_mode(field("citationMode")?)?,
        note_num: expect_i64(field("citationNoteNum")?, "citationNoteNum")?,
        hash: expect_i64(field("citationHash")?, "citationHash")?,
    })
}

fn read_inline(value: &Value) -> Result<Inline> {
    let (t, c) = read_tagged(value, "Inline")?;

    if !INLINE_TAGS.contains(&t) {
        tracing::debug!(tag = t, "passing through unknown inline");
        return Ok(Inline::Unknown(value.clone()));
    }

    match t {
        "Space" => return Ok(Inline::Space),
        "SoftBreak" => return Ok(Inline::SoftBreak),
        "LineBreak" => return Ok(Inline::LineBreak),
        _ => {}
    }

    let c = require_content(c, t)?;
    let inline = match t {
        "Str" => Inline::Str(Str {
            text: expect_str(c, "Str content")?,
        }),
        "Emph" => Inline::Emph(Emph {
            content: read_inlines(c)?,
        }),
        "Underline" => Inline::Underline(Underline {
            content: read_inlines(c)?,
        }),
        "Strong" => Inline::Strong(Strong {
            content: read_inlines(c)?,
        }),
        "Strikeout" => Inline::Strikeout(Strikeout {
            content: read_inlines(c)?,
        }),
        "Superscript" => Inline::Superscript(Superscript {
            content: read_inlines(c)?,
        }),
        "Subscript" => Inline::Subscript(Subscript {
            content: read_inlines(c)?,
        }),
        "SmallCaps" => Inline::SmallCaps(SmallCaps {
            content: read_inlines(c)?,
        }),
        "Quoted" => {
            let [quote_type, content] = expect_tuple::<2>(c, "Quoted")?;
            Inline::Quoted(Quoted {
                quote_type: read_quote_type(quote_type)?,
                content: read_inlines(content)?,
            })
        }
        "Cite" => {
            let [citations, content] = expect_tuple::<2>(c, "Cite")?;
            Inline::Cite(Cite {
                citations: expect_array(citations, "Cite citations")?
                    .iter()
                    .map(read_citation)
                    .collect::<Result<Vec<_>>>()?,
                content: read_inlines(content)?,
            })
        }
        "Code" => {
            let [attr, text] = expect_tuple::<2>(c, "Code")?;
            Inline::Code(Code {
                attr: read_attr(attr)?,
                text: expect_str(text, "Code text")?,
            })
        }
        "Math" => {
            let [math_type, text] = expect_tuple::<2>(c, "Math")?;
            Inline::Math(Math {
                math_type: read_math_type(math_type)?,
                text: expect_str(text, "Math text")?,
            })
        }
        "RawInline" => {
            let [format, text] = expect_tuple::<2>(c, "RawInline")?;
            Inline::RawInline(RawInline {
                format: expect_str(format, "RawInline format")?,
                text: expect_str(text, "RawInline text")?,
            })
        }
        "Link" => {
            let [attr, content, target] = expect_tuple::<3>(c, "Link")?;
            Inline::Link(Link {
                attr: read_attr(attr)?,
                content: read_inlines(content)?,
                target: read_target(target)?,
            })
        }
        "Image" => {
            let [attr, content, target] = expect_tuple::<3>(c, "Image")?;
            Inline::Image(Image {
                attr: read_attr(attr)?,
                content: read_inlines(content)?,
                target: read_target(target)?,
            })
        }
        "Note" => Inline::Note(Note {
            content: read_blocks(c)?,
        }),
        "Span" => {
            let [attr, content] = expect_tuple::<2>(c, "Span")?;
            Inline::Span(Span {
                attr: read_attr(attr)?,
                content: read_inlines(content)?,
            })
        }
        other => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "Inline {}",
                other
            )));
        }
    };
    Ok(inline)
}

// ============================================================================
// Blocks
// ============================================================================

pub fn read_blocks(value: &Value) -> Result<Vec<Block>> {
    expect_array(value, "Blocks")?
        .iter()
        .map(read_block)
        .collect()
}

fn read_blockss(value: &Value) -> Result<Vec<Vec<Block>>> {
    expect_array(value, "List items")?
        .iter()
        .map(read_blocks)
        .collect()
}

fn read_list_attributes(value: &Value) -> Result<ListAttributes> {
    let [start, style, delim] = expect_tuple::<3>(value, "ListAttributes")?;
    let start = expect_i64(start, "ListAttributes start")?;

    let style = match read_tagged(style, "ListNumberStyle")?.0 {
        "DefaultStyle" => ListNumberStyle::Default,
        "Example" => ListNumberStyle::Example,
        "Decimal" => ListNumberStyle::Decimal,
        "LowerRoman" => ListNumberStyle::LowerRoman,
        "UpperRoman" => ListNumberStyle::UpperRoman,
        "LowerAlpha" => ListNumberStyle::LowerAlpha,
        "UpperAlpha" => ListNumberStyle::UpperAlpha,
        other => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "ListNumberStyle {}",
                other
            )));
        }
    };

    let delim = match read_tagged(delim, "ListNumberDelim")?.0 {
        "DefaultDelim" => ListNumberDelim::Default,
        "Period" => ListNumberDelim::Period,
        "OneParen" => ListNumberDelim::OneParen,
        "TwoParens" => ListNumberDelim::TwoParens,
        other => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "ListNumberDelim {}",
                other
            )));
        }
    };

    Ok((start, style, delim))
}

fn read_caption(value: &Value) -> Result<Caption> {
    let [short, long] = expect_tuple::<2>(value, "Caption")?;
    let short = if short.is_null() {
        None
    } else {
        Some(read_inlines(short)?)
    };
    Ok(Caption {
        short,
        long: read_blocks(long)?,
    })
}

fn read_alignment(value: &Value) -> Result<Alignment> {
    match read_tagged(value, "Alignment")?.0 {
        "AlignLeft" => Ok(Alignment::Left),
        "AlignCenter" => Ok(Alignment::Center),
        "AlignRight" => Ok(Alignment::Right),
        "AlignDefault" => Ok(Alignment::Default),
        other => Err(JsonReadError::UnsupportedVariant(format!(
            "Alignment {}",
            other
        ))),
    }
}

fn read_colwidth(value: &Value) -> Result<ColWidth> {
    let (t, c) = read_tagged(value, "ColWidth")?;
    match t {
        "ColWidthDefault" => Ok(ColWidth::Default),
        "ColWidth" => {
            let width = require_content(c, t)?
                .as_f64()
                .ok_or_else(|| invalid("ColWidth must be a number"))?;
            Ok(ColWidth::Percentage(width))
        }
        other => Err(JsonReadError::UnsupportedVariant(format!(
            "ColWidth {}",
            other
        ))),
    }
}

fn read_colspec(value: &Value) -> Result<ColSpec> {
    let [alignment, width] = expect_tuple::<2>(value, "ColSpec")?;
    Ok((read_alignment(alignment)?, read_colwidth(width)?))
}

fn read_cell(value: &Value) -> Result<Cell> {
    let [attr, alignment, row_span, col_span, content] = expect_tuple::<5>(value, "Cell")?;
    Ok(Cell {
        attr: read_attr(attr)?,
        alignment: read_alignment(alignment)?,
        row_span: expect_usize(row_span, "Cell row span")?,
        col_span: expect_usize(col_span, "Cell col span")?,
        content: read_blocks(content)?,
    })
}

fn read_row(value: &Value) -> Result<Row> {
    let [attr, cells] = expect_tuple::<2>(value, "Row")?;
    Ok(Row {
        attr: read_attr(attr)?,
        cells: expect_array(cells, "Row cells")?
            .iter()
            .map(read_cell)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn read_rows(value: &Value) -> Result<Vec<Row>> {
    expect_array(value, "Rows")?.iter().map(read_row).collect()
}

fn read_table_head(value: &Value) -> Result<TableHead> {
    let [attr, rows] = expect_tuple::<2>(value, "TableHead")?;
    Ok(TableHead {
        attr: read_attr(attr)?,
        rows: read_rows(rows)?,
    })
}

fn read_table_body(value: &Value) -> Result<TableBody> {
    let [attr, rowhead_columns, head, body] = expect_tuple::<4>(value, "TableBody")?;
    Ok(TableBody {
        attr: read_attr(attr)?,
        rowhead_columns: expect_usize(rowhead_columns, "TableBody row head columns")?,
        head: read_rows(head)?,
        body: read_rows(body)?,
    })
}

fn read_table_foot(value: &Value) -> Result<TableFoot> {
    let [attr, rows] = expect_tuple::<2>(value, "TableFoot")?;
    Ok(TableFoot {
        attr: read_attr(attr)?,
        rows: read_rows(rows)?,
    })
}

fn read_block(value: &Value) -> Result<Block> {
    let (t, c) = read_tagged(value, "Block")?;

    if !BLOCK_TAGS.contains(&t) {
        tracing::debug!(tag = t, "passing through unknown block");
        return Ok(Block::Unknown(value.clone()));
    }

    if t == "HorizontalRule" {
        return Ok(Block::HorizontalRule);
    }

    let c = require_content(c, t)?;
    let block = match t {
        "Plain" => Block::Plain(Plain {
            content: read_inlines(c)?,
        }),
        "Para" => Block::Paragraph(Paragraph {
            content: read_inlines(c)?,
        }),
        "LineBlock" => Block::LineBlock(LineBlock {
            content: expect_array(c, "LineBlock content")?
                .iter()
                .map(read_inlines)
                .collect::<Result<Vec<_>>>()?,
        }),
        "CodeBlock" => {
            let [attr, text] = expect_tuple::<2>(c, "CodeBlock")?;
            Block::CodeBlock(CodeBlock {
                attr: read_attr(attr)?,
                text: expect_str(text, "CodeBlock text")?,
            })
        }
        "RawBlock" => {
            let [format, text] = expect_tuple::<2>(c, "RawBlock")?;
            Block::RawBlock(RawBlock {
                format: expect_str(format, "RawBlock format")?,
                text: expect_str(text, "RawBlock text")?,
            })
        }
        "BlockQuote" => Block::BlockQuote(BlockQuote {
            content: read_blocks(c)?,
        }),
        "OrderedList" => {
            let [attr, items] = expect_tuple::<2>(c, "OrderedList")?;
            Block::OrderedList(OrderedList {
                attr: read_list_attributes(attr)?,
                content: read_blockss(items)?,
            })
        }
        "BulletList" => Block::BulletList(BulletList {
            content: read_blockss(c)?,
        }),
        "DefinitionList" => {
            let content = expect_array(c, "DefinitionList content")?
                .iter()
                .map(|item| {
                    let [term, definitions] = expect_tuple::<2>(item, "DefinitionList item")?;
                    Ok((read_inlines(term)?, read_blockss(definitions)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Block::DefinitionList(DefinitionList { content })
        }
        "Header" => {
            let [level, attr, content] = expect_tuple::<3>(c, "Header")?;
            Block::Header(Header {
                level: expect_usize(level, "Header level")?,
                attr: read_attr(attr)?,
                content: read_inlines(content)?,
            })
        }
        "Table" => {
            let [attr, caption, colspec, head, bodies, foot] = expect_tuple::<6>(c, "Table")?;
            Block::Table(Table {
                attr: read_attr(attr)?,
                caption: read_caption(caption)?,
                colspec: expect_array(colspec, "Table colspecs")?
                    .iter()
                    .map(read_colspec)
                    .collect::<Result<Vec<_>>>()?,
                head: read_table_head(head)?,
                bodies: expect_array(bodies, "Table bodies")?
                    .iter()
                    .map(read_table_body)
                    .collect::<Result<Vec<_>>>()?,
                foot: read_table_foot(foot)?,
            })
        }
        "Figure" => {
            let [attr, caption, content] = expect_tuple::<3>(c, "Figure")?;
            Block::Figure(Figure {
                attr: read_attr(attr)?,
                caption: read_caption(caption)?,
                content: read_blocks(content)?,
            })
        }
        "Div" => {
            let [attr, content] = expect_tuple::<2>(c, "Div")?;
            Block::Div(Div {
                attr: read_attr(attr)?,
                content: read_blocks(content)?,
            })
        }
        other => {
            return Err(JsonReadError::UnsupportedVariant(format!(
                "Block {}",
                other
            )));
        }
    };
    Ok(block)
}

// ============================================================================
// Metadata
// ============================================================================

fn read_meta(value: &Value) -> Result<Meta> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("Expected object for Meta"))?;
    read_meta_map(obj)
}

fn read_meta_map(obj: &Map<String, Value>) -> Result<Meta> {
    obj.iter()
        .map(|(key, value)| Ok((key.clone(), read_meta_value(value)?)))
        .collect()
}

fn read_meta_value(value: &Value) -> Result<MetaValue> {
    let (t, c) = read_tagged(value, "MetaValue")?;
    if !META_TAGS.contains(&t) {
        tracing::debug!(tag = t, "passing through unknown metadata value");
        return Ok(MetaValue::Unknown(value.clone()));
    }
    let c = require_content(c, t)?;
    match t {
        "MetaMap" => {
            let obj = c
                .as_object()
                .ok_or_else(|| invalid("MetaMap content must be object"))?;
            Ok(MetaValue::MetaMap(read_meta_map(obj)?))
        }
        "MetaList" => Ok(MetaValue::MetaList(
            expect_array(c, "MetaList content")?
                .iter()
                .map(read_meta_value)
                .collect::<Result<Vec<_>>>()?,
        )),
        "MetaBool" => c
            .as_bool()
            .map(MetaValue::MetaBool)
            .ok_or_else(|| invalid("MetaBool content must be boolean")),
        "MetaString" => Ok(MetaValue::MetaString(expect_str(c, "MetaString content")?)),
        "MetaInlines" => Ok(MetaValue::MetaInlines(read_inlines(c)?)),
        "MetaBlocks" => Ok(MetaValue::MetaBlocks(read_blocks(c)?)),
        other => Err(JsonReadError::UnsupportedVariant(format!(
            "MetaValue {}",
            other
        ))),
    }
}
