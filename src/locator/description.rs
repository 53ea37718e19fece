use crate::dom::{DocumentTree, NodeId};
use crate::locator::candidate::{SelectorCandidate, generate_candidates};
use crate::locator::key::{element_key, page_key};
use crate::locator::name::resolve_name;
use crate::locator::role::resolve_role;
use crate::locator::warning::{Warning, collect_warnings};
use serde::Serialize;

/// Maximum length of the outer HTML snippet, ellipsis included
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Everything needed to write a test step for one element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescription {
    pub url: String,
    pub title: String,
    pub page_key: String,
    pub role: Option<String>,
    pub name: Option<String>,
    pub outer_html_snippet: String,
    pub element_key: String,
    /// Ranked locators, css fallback last
    pub selectors: Vec<SelectorCandidate>,
    pub warnings: Vec<Warning>,
}

impl ElementDescription {
    /// Highest-ranked locator
    pub fn best_selector(&self) -> Option<&SelectorCandidate> {
        self.selectors.first()
    }

    pub fn has_warning(&self, warning: Warning) -> bool {
        self.warnings.contains(&warning)
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Describe an element of `tree`
pub fn describe(tree: &dyn DocumentTree, node: NodeId) -> ElementDescription {
    let role = resolve_role(tree, node);
    let name = resolve_name(tree, node);
    let selectors = generate_candidates(tree, node, role.as_deref(), name.as_deref());

    let element_key = element_key(
        role.as_deref(),
        name.as_deref(),
        tree.attribute(node, "id"),
        tree.tag_name(node),
        selectors.first().map(|c| c.kind),
    );
    let warnings = collect_warnings(tree, node, name.as_deref(), &selectors);

    log::debug!(
        "described <{}> as {} ({} selectors, {} warnings)",
        tree.tag_name(node),
        element_key,
        selectors.len(),
        warnings.len()
    );

    ElementDescription {
        url: tree.url().to_string(),
        title: tree.title().to_string(),
        page_key: page_key(tree.url(), tree.title()),
        role,
        name,
        outer_html_snippet: snippet(&tree.outer_html(node)),
        element_key,
        selectors,
        warnings,
    }
}

/// Cap markup at [`SNIPPET_MAX_CHARS`], ending with an ellipsis when cut
pub fn snippet(html: &str) -> String {
    if html.chars().count() <= SNIPPET_MAX_CHARS {
        return html.to_string();
    }
    let mut cut: String = html.chars().take(SNIPPET_MAX_CHARS - 1).collect();
    cut.push('…');
    cut
}
