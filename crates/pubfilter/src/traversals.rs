/*
 * traversals.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Depth-first application of block filters to a document.
//!
//! Each block is offered to the filter before its children. A kept block is
//! descended into. A replacement sequence is walked as a fresh block list, so
//! children a filter splices out of a replaced container are offered in turn
//! and nested containers are each rewritten. A filter must not hand back the
//! block it was given inside its own replacement.
//!
//! Blocks are reached wherever Pandoc nests them: block quotes, lists,
//! definition lists, figures, tables and their captions, footnotes, and
//! the `MetaBlocks`/`MetaInlines` values of the document metadata.

use crate::filter_context::FilterContext;
use pubfilter_types::{
    Block, Blocks, Caption, Cell, Inline, Inlines, Meta, MetaValue, Pandoc, Row,
};

/// Outcome of offering a block to a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// The filter does not apply; the block stays where it is.
    Keep(Block),
    /// Splice these blocks in place of the original. May be empty.
    Replace(Blocks),
}

/// A node-level transformation over blocks.
pub trait BlockFilter {
    fn name(&self) -> &'static str;

    fn rewrite(&self, block: Block, ctx: &FilterContext) -> Rewrite;
}

/// Run `filter` over the whole document, body and metadata.
pub fn apply_filter(pandoc: Pandoc, filter: &dyn BlockFilter, ctx: &FilterContext) -> Pandoc {
    let mut walker = Walker {
        filter,
        ctx,
        replaced: 0,
    };
    let meta = walker.walk_meta(pandoc.meta);
    let blocks = walker.walk_blocks(pandoc.blocks);
    tracing::debug!(
        filter = filter.name(),
        format = %ctx.format,
        replaced = walker.replaced,
        "filter pass complete"
    );
    Pandoc {
        api_version: pandoc.api_version,
        meta,
        blocks,
    }
}

/// Run `filter` over a block sequence only.
pub fn apply_filter_to_blocks(
    blocks: Blocks,
    filter: &dyn BlockFilter,
    ctx: &FilterContext,
) -> Blocks {
    Walker {
        filter,
        ctx,
        replaced: 0,
    }
    .walk_blocks(blocks)
}

struct Walker<'a> {
    filter: &'a dyn BlockFilter,
    ctx: &'a FilterContext,
    replaced: usize,
}

impl Walker<'_> {
    fn walk_blocks(&mut self, blocks: Blocks) -> Blocks {
        let mut output = Vec::with_capacity(blocks.len());
        for block in blocks {
            match self.filter.rewrite(block, self.ctx) {
                Rewrite::Keep(block) => output.push(self.walk_children(block)),
                Rewrite::Replace(replacement) => {
                    self.replaced += 1;
                    output.extend(self.walk_blocks(replacement));
                }
            }
        }
        output
    }

    fn walk_blockss(&mut self, items: Vec<Blocks>) -> Vec<Blocks> {
        items
            .into_iter()
            .map(|blocks| self.walk_blocks(blocks))
            .collect()
    }

    fn walk_children(&mut self, block: Block) -> Block {
        match block {
            Block::Plain(mut p) => {
                p.content = self.walk_inlines(p.content);
                Block::Plain(p)
            }
            Block::Paragraph(mut p) => {
                p.content = self.walk_inlines(p.content);
                Block::Paragraph(p)
            }
            Block::LineBlock(mut l) => {
                l.content = l
                    .content
                    .into_iter()
                    .map(|line| self.walk_inlines(line))
                    .collect();
                Block::LineBlock(l)
            }
            Block::BlockQuote(mut b) => {
                b.content = self.walk_blocks(b.content);
                Block::BlockQuote(b)
            }
            Block::OrderedList(mut o) => {
                o.content = self.walk_blockss(o.content);
                Block::OrderedList(o)
            }
            Block::BulletList(mut b) => {
                b.content = self.walk_blockss(b.content);
                Block::BulletList(b)
            }
            Block::DefinitionList(mut d) => {
                d.content = d
                    .content
                    .into_iter()
                    .map(|(term, definitions)| {
                        (self.walk_inlines(term), self.walk_blockss(definitions))
                    })
                    .collect();
                Block::DefinitionList(d)
            }
            Block::Header(mut h) => {
                h.content = self.walk_inlines(h.content);
                Block::Header(h)
            }
            Block::Table(mut t) => {
                t.caption = self.walk_caption(t.caption);
                t.head.rows = self.walk_rows(t.head.rows);
                for body in &mut t.bodies {
                    body.head = self.walk_rows(std::mem::take(&mut body.head));
                    body.body = self.walk_rows(std::mem::take(&mut body.body));
                }
                t.foot.rows = self.walk_rows(t.foot.rows);
                Block::Table(t)
            }
            Block::Figure(mut f) => {
                f.caption = self.walk_caption(f.caption);
                f.content = self.walk_blocks(f.content);
                Block::Figure(f)
            }
            Block::Div(mut d) => {
                d.content = self.walk_blocks(d.content);
                Block::Div(d)
            }
            // Leaves: no nested blocks.
            Block::CodeBlock(_)
            | Block::RawBlock(_)
            | Block::HorizontalRule
            | Block::Unknown(_) => block,
        }
    }

    fn walk_caption(&mut self, caption: Caption) -> Caption {
        Caption {
            short: caption.short.map(|short| self.walk_inlines(short)),
            long: self.walk_blocks(caption.long),
        }
    }

    fn walk_rows(&mut self, rows: Vec<Row>) -> Vec<Row> {
        rows.into_iter()
            .map(|row| Row {
                attr: row.attr,
                cells: row
                    .cells
                    .into_iter()
                    .map(|cell| Cell {
                        content: self.walk_blocks(cell.content),
                        ..cell
                    })
                    .collect(),
            })
            .collect()
    }

    /// Inlines are only descended into to reach footnote blocks.
    fn walk_inlines(&mut self, inlines: Inlines) -> Inlines {
        inlines
            .into_iter()
            .map(|inline| self.walk_inline(inline))
            .collect()
    }

    fn walk_inline(&mut self, inline: Inline) -> Inline {
        match inline {
            Inline::Note(mut n) => {
                n.content = self.walk_blocks(n.content);
                Inline::Note(n)
            }
            Inline::Emph(mut e) => {
                e.content = self.walk_inlines(e.content);
                Inline::Emph(e)
            }
            Inline::Underline(mut u) => {
                u.content = self.walk_inlines(u.content);
                Inline::Underline(u)
            }
            Inline::Strong(mut s) => {
                s.content = self.walk_inlines(s.content);
                Inline::Strong(s)
            }
            Inline::Strikeout(mut s) => {
                s.content = self.walk_inlines(s.content);
                Inline::Strikeout(s)
            }
            Inline::Superscript(mut s) => {
                s.content = self.walk_inlines(s.content);
                Inline::Superscript(s)
            }
            Inline::Subscript(mut s) => {
                s.content = self.walk_inlines(s.content);
                Inline::Subscript(s)
            }
            Inline::SmallCaps(mut s) => {
                s.content = self.walk_inlines(s.content);
                Inline::SmallCaps(s)
            }
            Inline::Quoted(mut q) => {
                q.content = self.walk_inlines(q.content);
                Inline::Quoted(q)
            }
            Inline::Cite(mut c) => {
                for citation in &mut c.citations {
                    citation.prefix = self.walk_inlines(std::mem::take(&mut citation.prefix));
                    citation.suffix = self.walk_inlines(std::mem::take(&mut citation.suffix));
                }
                c.content = self.walk_inlines(c.content);
                Inline::Cite(c)
            }
            Inline::Link(mut l) => {
                l.content = self.walk_inlines(l.content);
                Inline::Link(l)
            }
            Inline::Image(mut i) => {
                i.content = self.walk_inlines(i.content);
                Inline::Image(i)
            }
            Inline::Span(mut s) => {
                s.content = self.walk_inlines(s.content);
                Inline::Span(s)
            }
            Inline::Str(_)
            | Inline::Code(_)
            | Inline::Space
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Math(_)
            | Inline::RawInline(_)
            | Inline::Unknown(_) => inline,
        }
    }

    fn walk_meta(&mut self, meta: Meta) -> Meta {
        meta.into_iter()
            .map(|(key, value)| (key, self.walk_meta_value(value)))
            .collect()
    }

    fn walk_meta_value(&mut self, value: MetaValue) -> MetaValue {
        match value {
            MetaValue::MetaMap(map) => MetaValue::MetaMap(self.walk_meta(map)),
            MetaValue::MetaList(items) => MetaValue::MetaList(
                items
                    .into_iter()
                    .map(|item| self.walk_meta_value(item))
                    .collect(),
            ),
            MetaValue::MetaBlocks(blocks) => MetaValue::MetaBlocks(self.walk_blocks(blocks)),
            MetaValue::MetaInlines(inlines) => {
                MetaValue::MetaInlines(self.walk_inlines(inlines))
            }
            MetaValue::MetaString(_) | MetaValue::MetaBool(_) | MetaValue::Unknown(_) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubfilter_types::{Div, Note, Paragraph, RawBlock, empty_attr};
    use std::cell::RefCell;

    /// Records every block tag it is offered; never rewrites.
    struct Recorder {
        seen: RefCell<Vec<&'static str>>,
    }

    impl BlockFilter for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn rewrite(&self, block: Block, _ctx: &FilterContext) -> Rewrite {
            self.seen.borrow_mut().push(block.tag());
            Rewrite::Keep(block)
        }
    }

    /// Replaces every Div with its content surrounded by two markers.
    struct Unwrap;

    impl BlockFilter for Unwrap {
        fn name(&self) -> &'static str {
            "unwrap"
        }

        fn rewrite(&self, block: Block, _ctx: &FilterContext) -> Rewrite {
            match block {
                Block::Div(div) => {
                    let mut out = vec![RawBlock::new("latex", "<").into()];
                    out.extend(div.content);
                    out.push(RawBlock::new("latex", ">").into());
                    Rewrite::Replace(out)
                }
                other => Rewrite::Keep(other),
            }
        }
    }

    fn div(content: Blocks) -> Block {
        Block::Div(Div {
            attr: empty_attr(),
            content,
        })
    }

    fn para(text: &str) -> Block {
        Block::Paragraph(Paragraph {
            content: vec![Inline::str(text)],
        })
    }

    fn raw_texts(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .map(|b| match b {
                Block::RawBlock(r) => r.text.clone(),
                other => other.tag().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_parent_is_offered_before_children() {
        let recorder = Recorder {
            seen: RefCell::new(vec![]),
        };
        let blocks = vec![div(vec![para("a"), div(vec![para("b")])])];
        apply_filter_to_blocks(blocks, &recorder, &FilterContext::default());
        assert_eq!(
            *recorder.seen.borrow(),
            vec!["Div", "Para", "Div", "Para"]
        );
    }

    #[test]
    fn test_nested_divs_are_each_replaced_once() {
        let blocks = vec![div(vec![div(vec![para("x")])])];
        let out = apply_filter_to_blocks(blocks, &Unwrap, &FilterContext::default());
        assert_eq!(raw_texts(&out), vec!["<", "<", "Para", ">", ">"]);
    }

    #[test]
    fn test_spliced_children_are_offered_once() {
        let recorder = Recorder {
            seen: RefCell::new(vec![]),
        };
        struct UnwrapAndRecord<'a>(&'a Recorder);
        impl BlockFilter for UnwrapAndRecord<'_> {
            fn name(&self) -> &'static str {
                "unwrap-and-record"
            }

            fn rewrite(&self, block: Block, ctx: &FilterContext) -> Rewrite {
                let Rewrite::Keep(block) = self.0.rewrite(block, ctx) else {
                    unreachable!("recorder never replaces");
                };
                Unwrap.rewrite(block, ctx)
            }
        }

        let blocks = vec![div(vec![para("a"), div(vec![para("b")])])];
        let out = apply_filter_to_blocks(
            blocks,
            &UnwrapAndRecord(&recorder),
            &FilterContext::default(),
        );
        assert_eq!(raw_texts(&out), vec!["<", "Para", "<", "Para", ">", ">"]);
        // Each inserted marker is offered once as well; no block is seen twice.
        assert_eq!(
            *recorder.seen.borrow(),
            vec!["Div", "RawBlock", "Para", "Div", "RawBlock", "Para", "RawBlock", "RawBlock"]
        );
    }

    #[test]
    fn test_unknown_blocks_pass_through() {
        let unknown = Block::Unknown(serde_json::json!({"t": "Null"}));
        let blocks = vec![div(vec![unknown.clone()])];
        let out = apply_filter_to_blocks(blocks, &Unwrap, &FilterContext::default());
        assert_eq!(
            out,
            vec![
                RawBlock::new("latex", "<").into(),
                unknown,
                RawBlock::new("latex", ">").into(),
            ]
        );
    }

    #[test]
    fn test_blocks_inside_footnotes_are_reached() {
        let blocks = vec![Block::Paragraph(Paragraph {
            content: vec![
                Inline::str("see"),
                Inline::Note(Note {
                    content: vec![div(vec![para("note")])],
                }),
            ],
        })];
        let out = apply_filter_to_blocks(blocks, &Unwrap, &FilterContext::default());
        let Block::Paragraph(p) = &out[0] else {
            panic!("Expected Para, got {:?}", out[0]);
        };
        let Inline::Note(note) = &p.content[1] else {
            panic!("Expected Note");
        };
        assert_eq!(raw_texts(&note.content), vec!["<", "Para", ">"]);
    }

    #[test]
    fn test_metadata_blocks_are_reached() {
        let mut meta = Meta::new();
        meta.insert(
            "abstract".to_string(),
            MetaValue::MetaBlocks(vec![div(vec![])]),
        );
        meta.insert(
            "title".to_string(),
            MetaValue::MetaString("untouched".to_string()),
        );
        let pandoc = Pandoc {
            meta,
            ..Default::default()
        };
        let out = apply_filter(pandoc, &Unwrap, &FilterContext::default());
        let Some(MetaValue::MetaBlocks(blocks)) = out.meta.get("abstract") else {
            panic!("Expected MetaBlocks");
        };
        assert_eq!(raw_texts(blocks), vec!["<", ">"]);
        assert_eq!(
            out.meta.get("title"),
            Some(&MetaValue::MetaString("untouched".to_string()))
        );
    }

    #[test]
    fn test_keep_everything_is_identity() {
        let recorder = Recorder {
            seen: RefCell::new(vec![]),
        };
        let pandoc = Pandoc::from_blocks(vec![
            para("a"),
            Block::HorizontalRule,
            div(vec![para("b")]),
        ]);
        let out = apply_filter(pandoc.clone(), &recorder, &FilterContext::default());
        assert_eq!(out, pandoc);
    }
}
