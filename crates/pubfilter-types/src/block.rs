/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::Attr;
use crate::caption::Caption;
use crate::inline::Inlines;
use crate::list::ListAttributes;
use crate::table::Table;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Plain(Plain),
    Paragraph(Paragraph),
    LineBlock(LineBlock),
    CodeBlock(CodeBlock),
    RawBlock(RawBlock),
    BlockQuote(BlockQuote),
    OrderedList(OrderedList),
    BulletList(BulletList),
    DefinitionList(DefinitionList),
    Header(Header),
    HorizontalRule,
    Table(Table),
    Figure(Figure),
    Div(Div),
    /// A constructor this crate does not model, kept as its JSON node.
    Unknown(serde_json::Value),
}

pub type Blocks = Vec<Block>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plain {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBlock {
    pub content: Vec<Inlines>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub attr: Attr,
    pub text: String,
}

/// Literal output text, emitted verbatim by the writer for `format`
/// and dropped by every other writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    pub format: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockQuote {
    pub content: Blocks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedList {
    pub attr: ListAttributes,
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletList {
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionList {
    pub content: Vec<(Inlines, Vec<Blocks>)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub level: usize,
    pub attr: Attr,
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub attr: Attr,
    pub caption: Caption,
    pub content: Blocks,
}

/// Generic block container. Its classes drive format-specific rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Div {
    pub attr: Attr,
    pub content: Blocks,
}

impl RawBlock {
    pub fn new(format: impl Into<String>, text: impl Into<String>) -> Self {
        RawBlock {
            format: format.into(),
            text: text.into(),
        }
    }
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Block::RawBlock(raw)
    }
}

impl From<Div> for Block {
    fn from(div: Div) -> Self {
        Block::Div(div)
    }
}

impl From<CodeBlock> for Block {
    fn from(code: CodeBlock) -> Self {
        Block::CodeBlock(code)
    }
}

impl Block {
    /// Pandoc's constructor name for this block, as used in the `t` field
    /// of the JSON serialization.
    pub fn tag(&self) -> &'static str {
        match self {
            Block::Plain(_) => "Plain",
            Block::Paragraph(_) => "Para",
            Block::LineBlock(_) => "LineBlock",
            Block::CodeBlock(_) => "CodeBlock",
            Block::RawBlock(_) => "RawBlock",
            Block::BlockQuote(_) => "BlockQuote",
            Block::OrderedList(_) => "OrderedList",
            Block::BulletList(_) => "BulletList",
            Block::DefinitionList(_) => "DefinitionList",
            Block::Header(_) => "Header",
            Block::HorizontalRule => "HorizontalRule",
            Block::Table(_) => "Table",
            Block::Figure(_) => "Figure",
            Block::Div(_) => "Div",
            Block::Unknown(_) => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::empty_attr;

    #[test]
    fn test_tag_uses_pandoc_constructor_names() {
        let para = Block::Paragraph(Paragraph { content: vec![] });
        assert_eq!(para.tag(), "Para");
        assert_eq!(Block::HorizontalRule.tag(), "HorizontalRule");
        let div = Block::from(Div {
            attr: empty_attr(),
            content: vec![],
        });
        assert_eq!(div.tag(), "Div");
    }

    #[test]
    fn test_raw_block_into_block() {
        let block: Block = RawBlock::new("latex", "\\newpage").into();
        let Block::RawBlock(raw) = block else {
            panic!("Expected RawBlock");
        };
        assert_eq!(raw.format, "latex");
        assert_eq!(raw.text, "\\newpage");
    }
}
