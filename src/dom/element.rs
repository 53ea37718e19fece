use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Represents a DOM element node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "button", "input")
    pub tag_name: String,

    /// Element attributes in document order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Child text runs and elements, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildNode>,
}

/// A child of an element: either a run of text or a nested element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChildNode {
    Text(String),
    Element(ElementNode),
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: add a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text run
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    /// Builder method: append child elements
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children.extend(children.into_iter().map(ChildNode::Element));
        self
    }

    /// Builder method: append one child element
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.add_child(child);
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(ChildNode::Element(child));
    }

    /// Add a text run
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(ChildNode::Text(text.into()));
    }

    /// Remove script, style, noscript and template elements recursively
    pub fn simplify(&mut self) {
        self.children.retain(|child| match child {
            ChildNode::Element(element) => !matches!(
                element.tag_name.to_ascii_lowercase().as_str(),
                "script" | "style" | "noscript" | "template"
            ),
            ChildNode::Text(_) => true,
        });

        for child in &mut self.children {
            if let ChildNode::Element(element) = child {
                element.simplify();
            }
        }
    }

    /// Serialize this element and its subtree back to HTML
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let tag = self.tag_name.to_ascii_lowercase();
        out.push('<');
        out.push_str(&tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                ChildNode::Text(text) => out.push_str(&escape_text(text)),
                ChildNode::Element(element) => element.write_html(out),
            }
        }

        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("button")
            .with_attribute("id", "test-id")
            .with_attribute("class", "btn primary")
            .with_text("Click me");

        assert_eq!(element.tag_name, "button");
        assert_eq!(element.attributes.get("id").map(String::as_str), Some("test-id"));
        assert_eq!(element.attributes.get("class").map(String::as_str), Some("btn primary"));
        assert_eq!(element.children, vec![ChildNode::Text("Click me".to_string())]);
    }

    #[test]
    fn test_children_keep_document_order() {
        let element = ElementNode::new("p")
            .with_text("Total: ")
            .with_child(ElementNode::new("strong").with_text("42"))
            .with_text(" items");

        assert_eq!(element.children.len(), 3);
        assert_eq!(element.outer_html(), "<p>Total: <strong>42</strong> items</p>");
    }

    #[test]
    fn test_simplify() {
        let mut parent = ElementNode::new("div");
        parent.add_child(ElementNode::new("p").with_text("Content"));
        parent.add_child(ElementNode::new("script").with_text("alert('test')"));
        parent.add_child(ElementNode::new("style").with_text(".test { color: red; }"));
        parent.add_child(ElementNode::new("span").with_text("More content"));

        parent.simplify();

        let tags: Vec<_> = parent
            .children
            .iter()
            .filter_map(|child| match child {
                ChildNode::Element(element) => Some(element.tag_name.as_str()),
                ChildNode::Text(_) => None,
            })
            .collect();
        assert_eq!(tags, vec!["p", "span"]);
    }

    #[test]
    fn test_deserialize_mixed_children() {
        let json = r#"{
            "tag_name": "label",
            "attributes": {"for": "email"},
            "children": ["Email ", {"tag_name": "em", "children": ["address"]}]
        }"#;

        let element: ElementNode = serde_json::from_str(json).unwrap();
        assert_eq!(element.attributes.get("for").map(String::as_str), Some("email"));
        assert_eq!(element.outer_html(), r#"<label for="email">Email <em>address</em></label>"#);

        let round_trip: ElementNode = serde_json::from_str(&serde_json::to_string(&element).unwrap()).unwrap();
        assert_eq!(element, round_trip);
    }

    #[test]
    fn test_outer_html() {
        let element = ElementNode::new("label")
            .with_attribute("for", "q")
            .with_attribute("title", "say \"hi\"")
            .with_text("A < B")
            .with_child(ElementNode::new("input").with_attribute("id", "q"));

        assert_eq!(
            element.outer_html(),
            r#"<label for="q" title="say &quot;hi&quot;">A &lt; B<input id="q"></label>"#
        );
    }
}
