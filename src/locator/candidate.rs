use crate::dom::{DocumentTree, NodeId};
use crate::locator::css::css_fallback;
use crate::locator::name::{label_text, own_text, placeholder};
use crate::locator::text::{non_empty, quote};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes holding a test id, in lookup order
pub const TEST_ID_ATTRIBUTES: [&str; 2] = ["data-testid", "data-test-id"];

/// Locator strategy of a candidate, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectorKind {
    ByRole,
    ByLabel,
    ByPlaceholder,
    ByTestId,
    ByText,
    Css,
}

impl SelectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByRole => "byRole",
            Self::ByLabel => "byLabel",
            Self::ByPlaceholder => "byPlaceholder",
            Self::ByTestId => "byTestId",
            Self::ByText => "byText",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed way to locate an element, with the signal that justifies it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorCandidate {
    pub kind: SelectorKind,
    pub selector: String,
    pub reason: String,
}

impl SelectorCandidate {
    pub fn new(kind: SelectorKind, selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}

/// Generate every applicable candidate, highest priority first
///
/// The css candidate is always last and always present.
pub fn generate_candidates(
    tree: &dyn DocumentTree,
    node: NodeId,
    role: Option<&str>,
    name: Option<&str>,
) -> Vec<SelectorCandidate> {
    [
        by_role(role, name),
        by_label(tree, node),
        by_placeholder(tree, node),
        by_test_id(tree, node),
        by_text(tree, node),
        Some(by_css(tree, node)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn by_role(role: Option<&str>, name: Option<&str>) -> Option<SelectorCandidate> {
    let role = role?;
    Some(match name {
        Some(name) => SelectorCandidate::new(
            SelectorKind::ByRole,
            format!("getByRole({}, {{ name: {} }})", quote(role), quote(name)),
            "role and accessible name",
        ),
        None => SelectorCandidate::new(
            SelectorKind::ByRole,
            format!("getByRole({})", quote(role)),
            "role only",
        ),
    })
}

pub fn by_label(tree: &dyn DocumentTree, node: NodeId) -> Option<SelectorCandidate> {
    let label = label_text(tree, node)?;
    Some(SelectorCandidate::new(
        SelectorKind::ByLabel,
        format!("getByLabel({})", quote(&label)),
        "associated label",
    ))
}

pub fn by_placeholder(tree: &dyn DocumentTree, node: NodeId) -> Option<SelectorCandidate> {
    let placeholder = placeholder(tree, node)?;
    Some(SelectorCandidate::new(
        SelectorKind::ByPlaceholder,
        format!("getByPlaceholder({})", quote(&placeholder)),
        "placeholder attribute",
    ))
}

pub fn by_test_id(tree: &dyn DocumentTree, node: NodeId) -> Option<SelectorCandidate> {
    let (attribute, test_id) = TEST_ID_ATTRIBUTES.iter().find_map(|&attribute| {
        tree.attribute(node, attribute)
            .and_then(non_empty)
            .map(|value| (attribute, value))
    })?;
    Some(SelectorCandidate::new(
        SelectorKind::ByTestId,
        format!("getByTestId({})", quote(&test_id)),
        format!("{} attribute", attribute),
    ))
}

pub fn by_text(tree: &dyn DocumentTree, node: NodeId) -> Option<SelectorCandidate> {
    let text = own_text(tree, node)?;
    Some(SelectorCandidate::new(
        SelectorKind::ByText,
        format!("getByText({})", quote(&text)),
        "visible text",
    ))
}

pub fn by_css(tree: &dyn DocumentTree, node: NodeId) -> SelectorCandidate {
    let selector = css_fallback(tree, node);
    let reason = if selector.starts_with('#') {
        "CSS fallback (id)"
    } else {
        "CSS fallback (structural path)"
    };
    SelectorCandidate::new(SelectorKind::Css, selector, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomTree;

    fn candidates_for(html: &str, selector: &str, role: Option<&str>, name: Option<&str>) -> Vec<SelectorCandidate> {
        let tree = DomTree::from_html(html);
        let node = tree.select(selector).unwrap()[0];
        generate_candidates(&tree, node, role, name)
    }

    #[test]
    fn test_by_role() {
        let with_name = by_role(Some("button"), Some("Submit Order")).unwrap();
        assert_eq!(with_name.selector, "getByRole('button', { name: 'Submit Order' })");
        assert_eq!(with_name.reason, "role and accessible name");

        let role_only = by_role(Some("combobox"), None).unwrap();
        assert_eq!(role_only.selector, "getByRole('combobox')");

        assert!(by_role(None, Some("Orphan name")).is_none());
    }

    #[test]
    fn test_full_candidate_order() {
        let html = r#"
            <label for="email">Email</label>
            <input id="email" placeholder="you@example.com" data-testid="email-input">
        "#;
        let candidates = candidates_for(html, "#email", Some("textbox"), Some("Email"));
        let kinds: Vec<_> = candidates.iter().map(|c| c.kind).collect();

        assert_eq!(
            kinds,
            vec![
                SelectorKind::ByRole,
                SelectorKind::ByLabel,
                SelectorKind::ByPlaceholder,
                SelectorKind::ByTestId,
                SelectorKind::Css,
            ]
        );
        assert_eq!(candidates[1].selector, "getByLabel('Email')");
        assert_eq!(candidates[2].selector, "getByPlaceholder('you@example.com')");
        assert_eq!(candidates[3].selector, "getByTestId('email-input')");
        assert_eq!(candidates[3].reason, "data-testid attribute");
        assert_eq!(candidates[4].selector, "#email");
    }

    #[test]
    fn test_alternate_test_id_attribute() {
        let candidates = candidates_for(r#"<div data-test-id="cart">Cart</div>"#, "div", None, None);
        let test_id = candidates.iter().find(|c| c.kind == SelectorKind::ByTestId).unwrap();
        assert_eq!(test_id.selector, "getByTestId('cart')");
        assert_eq!(test_id.reason, "data-test-id attribute");
    }

    #[test]
    fn test_text_candidate_is_quoted() {
        let candidates = candidates_for("<p><span>It's   done</span></p>", "span", None, None);
        assert_eq!(candidates[0].kind, SelectorKind::ByText);
        assert_eq!(candidates[0].selector, r"getByText('It\'s done')");
    }

    #[test]
    fn test_css_always_last() {
        let candidates = candidates_for("<div><i></i></div>", "i", None, None);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, SelectorKind::Css);
        assert_eq!(candidates[0].reason, "CSS fallback (structural path)");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&SelectorKind::ByTestId).unwrap();
        assert_eq!(json, "\"byTestId\"");
        assert_eq!(SelectorKind::Css.to_string(), "css");
    }
}
