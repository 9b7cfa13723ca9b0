/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Options for a filter pass.
 */

use pubfilter_types::{Attr, has_class};

/// Class that marks a code block as a diagram by default.
pub const DEFAULT_DIAGRAM_CLASS: &str = "diagram";

/// Settings shared by every filter in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Code blocks carrying any of these classes are rewritten as diagrams.
    pub diagram_classes: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            diagram_classes: vec![DEFAULT_DIAGRAM_CLASS.to_string()],
        }
    }
}

impl FilterOptions {
    /// Use `classes` as diagram markers; an empty list keeps the default.
    pub fn with_diagram_classes(mut self, classes: Vec<String>) -> Self {
        if !classes.is_empty() {
            self.diagram_classes = classes;
        }
        self
    }

    /// True if `attr` carries any of the diagram marker classes.
    pub fn marks_diagram(&self, attr: &Attr) -> bool {
        self.diagram_classes.iter().any(|class| has_class(attr, class))
    }
}
