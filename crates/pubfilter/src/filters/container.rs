/*
 * filters/container.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Styled Divs to LaTeX environments.
 */

//! Rewrites styled Divs as nested LaTeX environments.
//!
//! For LaTeX-family output a Div is replaced by its content wrapped in one
//! environment per class. The first class is the outermost environment:
//!
//! ```text
//! ::: {.theorem .boxed}          \begin{theorem}
//! x                       =>     \begin{boxed}
//! :::                            x
//!                                \end{boxed}
//!                                \end{theorem}
//! ```
//!
//! Any other format keeps the Div untouched, so writers such as HTML can
//! style it by class. Class names are used verbatim as environment names.

use crate::filter_context::FilterContext;
use crate::format::{LATEX, OutputFormat};
use crate::traversals::{BlockFilter, Rewrite};
use pubfilter_types::{Block, Blocks, Div, RawBlock};

pub fn begin_environment(name: &str) -> Block {
    RawBlock::new(LATEX, format!("\\begin{{{}}}", name)).into()
}

pub fn end_environment(name: &str) -> Block {
    RawBlock::new(LATEX, format!("\\end{{{}}}", name)).into()
}

/// Wrap `content` in one environment per class, first class outermost.
///
/// Environments close in the reverse of the order they open. With no
/// classes the content is returned unchanged.
pub fn wrap_in_environments(classes: &[String], content: Blocks) -> Blocks {
    let mut wrapped = Vec::with_capacity(content.len() + 2 * classes.len());
    wrapped.extend(classes.iter().map(|class| begin_environment(class)));
    wrapped.extend(content);
    wrapped.extend(classes.iter().rev().map(|class| end_environment(class)));
    wrapped
}

/// Rewrite a single Div for `format`.
pub fn rewrite_container(div: Div, format: &OutputFormat) -> Rewrite {
    if !format.is_latex() {
        return Rewrite::Keep(Block::Div(div));
    }
    tracing::debug!(
        id = %div.attr.0,
        classes = ?div.attr.1,
        "wrapping div in environments"
    );
    let (_, classes, _) = div.attr;
    Rewrite::Replace(wrap_in_environments(&classes, div.content))
}

/// Block filter form of [`rewrite_container`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerRewriter;

impl BlockFilter for ContainerRewriter {
    fn name(&self) -> &'static str {
        "container"
    }

    fn rewrite(&self, block: Block, ctx: &FilterContext) -> Rewrite {
        match block {
            Block::Div(div) => rewrite_container(div, &ctx.format),
            other => Rewrite::Keep(other),
        }
    }
}
