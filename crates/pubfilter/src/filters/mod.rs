/*
 * filters/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The document filters shipped by this crate.
//!
//! - [`container`] - Divs with classes to LaTeX environments
//! - [`diagram`] - diagram code blocks to raw `tikzpicture` blocks

pub mod container;
pub mod diagram;

pub use container::ContainerRewriter;
pub use diagram::DiagramBlockRewriter;

use crate::traversals::BlockFilter;
use clap::ValueEnum;

/// Selectable filters, in the names used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterKind {
    /// Wrap Divs in one LaTeX environment per class
    #[value(alias = "boxes")]
    Container,
    /// Embed diagram code blocks in a tikzpicture environment
    #[value(alias = "tikzblock")]
    Diagram,
}

impl FilterKind {
    /// Filters run by default, in order.
    pub const ALL: [FilterKind; 2] = [FilterKind::Container, FilterKind::Diagram];

    pub fn build(self) -> Box<dyn BlockFilter> {
        match self {
            FilterKind::Container => Box::new(ContainerRewriter),
            FilterKind::Diagram => Box::new(DiagramBlockRewriter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_kind() {
        assert_eq!(FilterKind::Container.build().name(), "container");
        assert_eq!(FilterKind::Diagram.build().name(), "diagram");
    }

    #[test]
    fn test_historical_names_are_accepted() {
        assert_eq!(
            FilterKind::from_str("boxes", true),
            Ok(FilterKind::Container)
        );
        assert_eq!(
            FilterKind::from_str("tikzblock", true),
            Ok(FilterKind::Diagram)
        );
    }
}
