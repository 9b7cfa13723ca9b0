/*
 * format.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The output format a filter pass renders for.

use std::fmt;

/// Raw markup emitted for the LaTeX family is always tagged with this format.
pub const LATEX: &str = "latex";

/// Formats whose writers consume raw `latex` blocks.
const LATEX_FAMILY: &[&str] = &["latex", "beamer"];

/// The target format handed to the filter by Pandoc (its first argument).
///
/// Pandoc may pass a format with extension modifiers (`latex+smart`); only the
/// base name takes part in classification, but the full string is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputFormat {
    name: String,
}

impl OutputFormat {
    pub fn new(name: impl Into<String>) -> Self {
        OutputFormat { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format name without `+ext`/`-ext` modifiers.
    pub fn base_name(&self) -> &str {
        match self.name.find(['+', '-']) {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }

    pub fn is_latex(&self) -> bool {
        LATEX_FAMILY.contains(&self.base_name())
    }
}

impl From<&str> for OutputFormat {
    fn from(name: &str) -> Self {
        OutputFormat::new(name)
    }
}

impl From<Option<String>> for OutputFormat {
    fn from(name: Option<String>) -> Self {
        OutputFormat::new(name.unwrap_or_default())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
