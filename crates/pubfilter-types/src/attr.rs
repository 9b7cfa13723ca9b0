/*
 * attr.rs
 * Copyright (c) 2025 Posit, PBC
 */

/// Identifier, classes and key-value pairs, in that order.
///
/// Key-value pairs are kept as an ordered list rather than a map: Pandoc
/// permits repeated keys and filters must hand them back untouched.
pub type Attr = (String, Vec<String>, Vec<(String, String)>);

pub fn empty_attr() -> Attr {
    (String::new(), vec![], vec![])
}

/// True if `class` is one of the attribute's classes.
pub fn has_class(attr: &Attr, class: &str) -> bool {
    attr.1.iter().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_attr_has_no_classes() {
        assert!(!has_class(&empty_attr(), "theorem"));
    }

    #[test]
    fn test_has_class_matches_whole_names() {
        let attr = (
            String::new(),
            vec!["theorem".to_string(), "boxed".to_string()],
            vec![],
        );
        assert!(has_class(&attr, "theorem"));
        assert!(has_class(&attr, "boxed"));
        assert!(!has_class(&attr, "box"));
    }
}
