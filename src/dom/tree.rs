use crate::dom::element::{ChildNode, ElementNode};
use crate::dom::provider::{DocumentTree, NodeId};
use crate::error::{LocatorError, Result};
use crate::locator::text::normalize_whitespace;
use html5ever::{Attribute, LocalName, QualName, ns};
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Element(NodeId),
}

#[derive(Debug, Clone)]
struct NodeData {
    tag_name: String,
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    content: Vec<Content>,
    /// Element children only, cached from `content`
    children: Vec<NodeId>,
}

/// A document snapshot with parent links, addressable by [`NodeId`]
///
/// Nodes are stored in document pre-order, so `NodeId(0)` is always the root.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    url: String,
    title: String,
}

impl DomTree {
    /// Build a tree from an element hierarchy
    pub fn new(root: ElementNode) -> Self {
        let mut nodes = Vec::new();
        let root = Self::flatten(&root, None, &mut nodes);

        let mut tree = Self {
            nodes,
            root,
            url: String::new(),
            title: String::new(),
        };
        tree.title = tree.document_title();
        tree
    }

    /// Parse an element hierarchy serialized as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let root: ElementNode = serde_json::from_str(json)
            .map_err(|e| LocatorError::DomParseFailed(format!("Failed to parse DOM JSON: {}", e)))?;
        Ok(Self::new(root))
    }

    /// Parse an HTML document
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::new(Self::convert_element(document.root_element()))
    }

    /// Builder method: set the document URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder method: override the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn convert_element(element: ElementRef<'_>) -> ElementNode {
        let value = element.value();
        let mut node = ElementNode::new(value.name());
        for (name, attr) in value.attrs() {
            node.add_attribute(name, attr);
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => node.add_text(String::from(&**text)),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        node.add_child(Self::convert_element(child_element));
                    }
                }
                _ => {}
            }
        }

        node
    }

    fn flatten(element: &ElementNode, parent: Option<NodeId>, nodes: &mut Vec<NodeData>) -> NodeId {
        let id = NodeId(nodes.len());
        nodes.push(NodeData {
            tag_name: element.tag_name.to_ascii_lowercase(),
            attributes: element.attributes.clone(),
            parent,
            content: Vec::new(),
            children: Vec::new(),
        });

        let mut content = Vec::with_capacity(element.children.len());
        let mut children = Vec::new();
        for child in &element.children {
            match child {
                ChildNode::Text(text) => content.push(Content::Text(text.clone())),
                ChildNode::Element(child_element) => {
                    let child_id = Self::flatten(child_element, Some(id), nodes);
                    content.push(Content::Element(child_id));
                    children.push(child_id);
                }
            }
        }

        nodes[id.0].content = content;
        nodes[id.0].children = children;
        id
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn document_title(&self) -> String {
        self.nodes
            .iter()
            .position(|n| n.tag_name == "title")
            .map(|i| normalize_whitespace(&self.text_content(NodeId(i))))
            .unwrap_or_default()
    }

    /// Rebuild the element hierarchy rooted at `id`
    pub fn element(&self, id: NodeId) -> Option<ElementNode> {
        let data = self.node(id)?;
        let mut element = ElementNode::new(data.tag_name.clone()).with_attributes(data.attributes.clone());
        for content in &data.content {
            match content {
                Content::Text(text) => element.add_text(text.clone()),
                Content::Element(child) => {
                    if let Some(child_element) = self.element(*child) {
                        element.add_child(child_element);
                    }
                }
            }
        }
        Some(element)
    }

    /// Resolve a CSS selector to elements of this tree, in document order
    ///
    /// Selectors run against a scraper document built node for node from the
    /// arena, so the structure matched is exactly this tree's.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>> {
        let parsed = Selector::parse(selector).map_err(|e| LocatorError::InvalidSelector {
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })?;

        let document = self.to_scraper();
        let positions: HashMap<_, usize> = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect();

        Ok(document
            .select(&parsed)
            .filter_map(|m| positions.get(&m.id()).map(|&i| NodeId(i)))
            .collect())
    }

    /// Mirror the arena into a scraper document, element for element
    fn to_scraper(&self) -> Html {
        let mut document = Html::new_document();
        let mut handles = Vec::with_capacity(self.nodes.len());

        // Pre-order storage: every parent is appended before its children.
        for data in &self.nodes {
            let element = Node::Element(scraper::node::Element::new(
                QualName::new(None, ns!(html), LocalName::from(data.tag_name.as_str())),
                data.attributes
                    .iter()
                    .map(|(name, value)| Attribute {
                        name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
                        value: value.as_str().into(),
                    })
                    .collect(),
            ));

            let parent = data.parent.and_then(|p| handles.get(p.0).copied());
            let handle = match parent.and_then(|p| document.tree.get_mut(p)) {
                Some(mut parent) => parent.append(element).id(),
                None => document.tree.root_mut().append(element).id(),
            };
            handles.push(handle);
        }

        document
    }

    /// First element carrying the attribute `name`
    pub fn find_by_attribute(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.attributes.contains_key(name))
            .map(NodeId)
    }

    /// Remove an attribute from an element, returning its previous value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.nodes.get_mut(id.0)?.attributes.shift_remove(name)
    }

    /// Remove script, style, noscript and template elements
    pub fn simplify(&mut self) {
        if let Some(mut root) = self.element(self.root) {
            root.simplify();
            let (url, title) = (std::mem::take(&mut self.url), std::mem::take(&mut self.title));
            *self = Self::new(root).with_url(url).with_title(title);
        }
    }

    /// Convert the DOM tree to JSON
    pub fn to_json(&self) -> Result<String> {
        let root = self
            .element(self.root)
            .ok_or_else(|| LocatorError::DomParseFailed("Tree has no root element".to_string()))?;
        serde_json::to_string_pretty(&root)
            .map_err(|e| LocatorError::DomParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        self.nodes.len()
    }
}

impl DocumentTree for DomTree {
    fn root(&self) -> NodeId {
        self.root
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.tag_name.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?.attributes.get(name).map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        // Depth-first; pushing in reverse keeps document order.
        let mut pending: Vec<&Content> = Vec::new();
        if let Some(data) = self.node(node) {
            pending.extend(data.content.iter().rev());
        }
        while let Some(content) = pending.pop() {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(child) => {
                    if let Some(data) = self.node(*child) {
                        pending.extend(data.content.iter().rev());
                    }
                }
            }
        }
        out
    }

    fn outer_html(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.outer_html()).unwrap_or_default()
    }

    fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        // Pre-order storage: a subtree is the contiguous run right after its root.
        if !self.contains(scope) {
            return Vec::new();
        }
        let mut out = Vec::new();
        for index in scope.0 + 1..self.nodes.len() {
            let id = NodeId(index);
            if self.is_within(id, scope) {
                out.push(id);
            } else {
                break;
            }
        }
        out
    }
}

impl DomTree {
    fn is_within(&self, node: NodeId, scope: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            if ancestor == scope {
                return true;
            }
            if ancestor.0 < scope.0 {
                return false;
            }
            current = self.parent(ancestor);
        }
        false
    }
}
