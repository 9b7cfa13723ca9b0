/*
 * filter_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Read-only context shared by all filters during one document pass.

use crate::format::OutputFormat;
use crate::options::FilterOptions;

/// Context for filter execution.
///
/// Built once from the harness arguments, then threaded by shared reference
/// through every pass. Filters never mutate it.
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    pub format: OutputFormat,
    pub options: FilterOptions,
}

impl FilterContext {
    pub fn new(format: impl Into<OutputFormat>) -> Self {
        Self {
            format: format.into(),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }
}
