use crate::dom::{DocumentTree, NodeId};
use crate::locator::candidate::{SelectorCandidate, SelectorKind};
use crate::locator::text::normalize_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Counters and ids: two or more ASCII digits in a row, or `#` followed by digits
static DYNAMIC_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{2,}|#[0-9]+").expect("valid regex"));

/// Selector fragility warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    CssFallback,
    DynamicText,
    DuplicateText,
}

impl Warning {
    pub fn message(&self) -> &'static str {
        match self {
            Self::CssFallback => "CSS fallback included",
            Self::DynamicText => "text looks dynamic",
            Self::DuplicateText => "multiple elements share the same text",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Collect warnings for a described element, in a fixed order
pub fn collect_warnings(
    tree: &dyn DocumentTree,
    node: NodeId,
    name: Option<&str>,
    selectors: &[SelectorCandidate],
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if selectors.iter().any(|c| c.kind == SelectorKind::Css) {
        warnings.push(Warning::CssFallback);
    }

    if name.is_some_and(looks_dynamic) {
        warnings.push(Warning::DynamicText);
    }

    let text = normalize_whitespace(&tree.text_content(node));
    if !text.is_empty() && count_elements_by_text(tree, &text) > 1 {
        warnings.push(Warning::DuplicateText);
    }

    warnings
}

pub fn looks_dynamic(text: &str) -> bool {
    DYNAMIC_TEXT.is_match(text)
}

/// Number of elements below `<body>` whose normalized text equals `text`
///
/// Scans the whole body on every call. Falls back to the document root when
/// there is no body.
pub fn count_elements_by_text(tree: &dyn DocumentTree, text: &str) -> usize {
    let scope = tree.body().unwrap_or_else(|| tree.root());
    tree.descendants(scope)
        .into_iter()
        .filter(|&node| normalize_whitespace(&tree.text_content(node)) == text)
        .count()
}
