/*
 * pandoc.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub use crate::block::Blocks;
pub use crate::meta::Meta;

/// The pandoc-api-version these types model.
pub const API_VERSION: [u64; 3] = [1, 23, 1];

/*
 * A data structure that mimics Pandoc's `data Pandoc` type.
 * The API version travels with the document so a filter hands back
 * exactly the version it was given.
 */

#[derive(Debug, Clone, PartialEq)]
pub struct Pandoc {
    pub api_version: Vec<u64>,
    pub meta: Meta,
    pub blocks: Blocks,
}

impl Default for Pandoc {
    fn default() -> Self {
        Pandoc {
            api_version: API_VERSION.to_vec(),
            meta: Meta::new(),
            blocks: vec![],
        }
    }
}

impl Pandoc {
    pub fn from_blocks(blocks: Blocks) -> Self {
        Pandoc {
            blocks,
            ..Default::default()
        }
    }
}
