/*
 * filters/diagram.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Diagram code blocks to raw TikZ.
 */

//! Embeds diagram code blocks as `tikzpicture` environments.
//!
//! Diagram sources are often written as standalone LaTeX documents so they
//! can be compiled on their own. The document wrapper is stripped: everything
//! up to and including the first `\begin{document}`, and the first
//! `\end{document}` together with everything after it. Whitespace inside the
//! markers is tolerated (`\begin { document }`). Missing markers leave the
//! text as it is. The result is emitted as a raw `latex` block regardless of
//! the output format.

use crate::filter_context::FilterContext;
use crate::format::LATEX;
use crate::options::FilterOptions;
use crate::traversals::{BlockFilter, Rewrite};
use once_cell::sync::Lazy;
use pubfilter_types::{Block, CodeBlock, RawBlock};
use regex::Regex;

pub const TIKZ_BEGIN: &str = "\\begin{tikzpicture}[domain=0:4]\n";
pub const TIKZ_END: &str = "\n\\end{tikzpicture}";

static BEGIN_DOCUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A.*?\\begin\s*\{\s*document\s*\}").expect("begin-document pattern")
});

static END_DOCUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\end\s*\{\s*document\s*\}.*\z").expect("end-document pattern")
});

/// Remove the preamble through `\begin{document}` and the postamble from
/// `\end{document}` on. Each is removed at most once.
pub fn strip_document_wrapper(text: &str) -> String {
    let without_preamble = BEGIN_DOCUMENT.replace(text, "");
    END_DOCUMENT.replace(&without_preamble, "").into_owned()
}

pub fn wrap_tikzpicture(body: &str) -> String {
    format!("{}{}{}", TIKZ_BEGIN, body, TIKZ_END)
}

/// Rewrite a code block carrying a diagram class, or `None` if it has none.
pub fn rewrite_diagram(code: &CodeBlock, options: &FilterOptions) -> Option<RawBlock> {
    let (id, classes, _) = &code.attr;
    if !options.marks_diagram(&code.attr) {
        tracing::trace!(id = %id, classes = ?classes, "code block is not a diagram");
        return None;
    }
    tracing::debug!(id = %id, "embedding diagram code block");
    let body = strip_document_wrapper(&code.text);
    Some(RawBlock::new(LATEX, wrap_tikzpicture(&body)))
}

/// Block filter form of [`rewrite_diagram`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramBlockRewriter;

impl BlockFilter for DiagramBlockRewriter {
    fn name(&self) -> &'static str {
        "diagram"
    }

    fn rewrite(&self, block: Block, ctx: &FilterContext) -> Rewrite {
        match block {
            Block::CodeBlock(code) => match rewrite_diagram(&code, &ctx.options) {
                Some(raw) => Rewrite::Replace(vec![Block::RawBlock(raw)]),
                None => Rewrite::Keep(Block::CodeBlock(code)),
            },
            other => Rewrite::Keep(other),
        }
    }
}
