use crate::dom::{DocumentTree, NodeId};

/// Resolve the accessible role: explicit `role` attribute first, then the tag table
pub fn resolve_role(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    explicit_role(tree, node).or_else(|| implicit_role(tree, node).map(str::to_string))
}

/// The `role` attribute, verbatim
pub fn explicit_role(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    tree.attribute(node, "role")
        .filter(|role| !role.is_empty())
        .map(str::to_string)
}

/// Role implied by the tag name and, for inputs, the `type` attribute
pub fn implicit_role(tree: &dyn DocumentTree, node: NodeId) -> Option<&'static str> {
    match tree.tag_name(node) {
        "button" => Some("button"),
        "a" if tree.attribute(node, "href").is_some() => Some("link"),
        "img" => Some("img"),
        "input" => {
            let input_type = tree.attribute(node, "type").unwrap_or("").to_ascii_lowercase();
            Some(match input_type.as_str() {
                "checkbox" => "checkbox",
                "radio" => "radio",
                "submit" | "button" => "button",
                _ => "textbox",
            })
        }
        "textarea" => Some("textbox"),
        "select" => Some("combobox"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, ElementNode};

    fn role_of(element: ElementNode) -> Option<String> {
        let tree = DomTree::new(element);
        resolve_role(&tree, tree.root())
    }

    #[test]
    fn test_explicit_role_is_verbatim() {
        let element = ElementNode::new("div").with_attribute("role", "Tab Panel");
        assert_eq!(role_of(element), Some("Tab Panel".to_string()));

        let overridden = ElementNode::new("button").with_attribute("role", "menuitem");
        assert_eq!(role_of(overridden), Some("menuitem".to_string()));
    }

    #[test]
    fn test_empty_role_falls_back_to_tag() {
        let element = ElementNode::new("button").with_attribute("role", "");
        assert_eq!(role_of(element), Some("button".to_string()));
    }

    #[test]
    fn test_tag_table() {
        let cases = [
            (ElementNode::new("button"), Some("button")),
            (ElementNode::new("a").with_attribute("href", "/home"), Some("link")),
            (ElementNode::new("a"), None),
            (ElementNode::new("img"), Some("img")),
            (ElementNode::new("input").with_attribute("type", "checkbox"), Some("checkbox")),
            (ElementNode::new("input").with_attribute("type", "RADIO"), Some("radio")),
            (ElementNode::new("input").with_attribute("type", "submit"), Some("button")),
            (ElementNode::new("input").with_attribute("type", "button"), Some("button")),
            (ElementNode::new("input").with_attribute("type", "email"), Some("textbox")),
            (ElementNode::new("input"), Some("textbox")),
            (ElementNode::new("textarea"), Some("textbox")),
            (ElementNode::new("select"), Some("combobox")),
            (ElementNode::new("div"), None),
            (ElementNode::new("span"), None),
        ];

        for (element, expected) in cases {
            let tag = element.tag_name.clone();
            assert_eq!(role_of(element).as_deref(), expected, "tag {}", tag);
        }
    }
}
