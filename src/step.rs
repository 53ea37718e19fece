//! Rendering of element descriptions into test steps and copyable text

use crate::locator::{ElementDescription, SelectorCandidate};
use std::fmt::Write;

/// What the generated step asserts about the element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Assertion {
    #[default]
    Visible,
    Hidden,
    Enabled,
    Disabled,
    HasText(String),
}

impl Assertion {
    fn phrase(&self) -> String {
        match self {
            Self::Visible => "should be visible".to_string(),
            Self::Hidden => "should be hidden".to_string(),
            Self::Enabled => "should be enabled".to_string(),
            Self::Disabled => "should be disabled".to_string(),
            Self::HasText(text) => format!("should contain text \"{}\"", text.replace('"', "\\\"")),
        }
    }
}

/// Gherkin `Then` step for the element
pub fn gherkin_step(description: &ElementDescription, assertion: &Assertion) -> String {
    format!("Then the \"{}\" element {}", description.element_key, assertion.phrase())
}

/// Mapping block listing the ranked locators of one element
pub fn selector_mapping(description: &ElementDescription) -> String {
    mapping_block(&description.element_key, &description.selectors)
}

/// `key:` followed by one indented `kind: selector` line per candidate
pub fn mapping_block(key: &str, selectors: &[SelectorCandidate]) -> String {
    let mut block = format!("{}:\n", key);
    for candidate in selectors {
        let _ = writeln!(block, "  {}: {}", candidate.kind, candidate.selector);
    }
    block
}

/// Plain-text summary: page, element, step, locators and warnings
pub fn render_text(description: &ElementDescription, assertion: &Assertion) -> String {
    let mut out = String::new();

    let page = if description.title.is_empty() {
        description.page_key.clone()
    } else {
        format!("{} [{}]", description.title, description.page_key)
    };
    let _ = writeln!(out, "Page: {}", page);
    if !description.url.is_empty() {
        let _ = writeln!(out, "URL: {}", description.url);
    }

    let _ = writeln!(out, "Element: {}", description.element_key);
    if let Some(role) = &description.role {
        let _ = writeln!(out, "Role: {}", role);
    }
    if let Some(name) = &description.name {
        let _ = writeln!(out, "Name: {}", name);
    }

    let _ = writeln!(out, "\nStep:\n  {}", gherkin_step(description, assertion));
    let _ = write!(out, "\nSelectors:\n{}", selector_mapping(description));

    if !description.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &description.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    let _ = writeln!(out, "\nHTML:\n  {}", description.outer_html_snippet);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentTree, DomTree};
    use crate::locator::describe;

    fn submit_button() -> ElementDescription {
        let tree = DomTree::from_html(
            r#"<html><head><title>Checkout</title></head>
               <body><button id="submit-btn" aria-label="Submit Order">Buy</button></body></html>"#,
        )
        .with_url("https://shop.example.com/checkout");
        let node = tree.find_by_id("submit-btn").unwrap();
        describe(&tree, node)
    }

    #[test]
    fn test_gherkin_step() {
        let description = submit_button();

        assert_eq!(
            gherkin_step(&description, &Assertion::default()),
            "Then the \"button_submit_order\" element should be visible"
        );
        assert_eq!(
            gherkin_step(&description, &Assertion::HasText("Say \"hi\"".to_string())),
            "Then the \"button_submit_order\" element should contain text \"Say \\\"hi\\\"\""
        );
        assert!(gherkin_step(&description, &Assertion::Disabled).ends_with("should be disabled"));
    }

    #[test]
    fn test_selector_mapping() {
        let description = submit_button();
        let block = selector_mapping(&description);

        let lines: Vec<_> = block.lines().collect();
        assert_eq!(lines[0], "button_submit_order:");
        assert_eq!(lines[1], "  byRole: getByRole('button', { name: 'Submit Order' })");
        assert_eq!(lines[2], "  byText: getByText('Buy')");
        assert_eq!(lines[3], "  css: #submit-btn");
    }

    #[test]
    fn test_render_text() {
        let description = submit_button();
        let text = render_text(&description, &Assertion::Visible);

        assert!(text.starts_with("Page: Checkout [shop_example_com_checkout]\n"));
        assert!(text.contains("URL: https://shop.example.com/checkout"));
        assert!(text.contains("Role: button"));
        assert!(text.contains("Name: Submit Order"));
        assert!(text.contains("Then the \"button_submit_order\" element should be visible"));
        assert!(text.contains("  - CSS fallback included"));
        assert!(text.contains("HTML:\n  <button"));
    }
}
