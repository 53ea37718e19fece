use serde::{Deserialize, Serialize};

/// Handle to an element inside a [`DocumentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the element in document (pre-)order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Read access to a document, as needed by the locator engine
///
/// Implementations only need to expose the element structure: tag names,
/// attributes, parent/child links and text. Lookups by id, scoped queries and
/// ancestor walks are provided on top of those.
///
/// Accessors called with a node that does not belong to the tree return empty
/// values rather than panicking.
pub trait DocumentTree {
    /// The document element (usually `<html>`)
    fn root(&self) -> NodeId;

    /// URL the document was loaded from, empty when unknown
    fn url(&self) -> &str;

    /// Document title, empty when unknown
    fn title(&self) -> &str;

    /// Lowercased tag name
    fn tag_name(&self, node: NodeId) -> &str;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Child elements in document order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Concatenated descendant text, like DOM `textContent`
    fn text_content(&self, node: NodeId) -> String;

    /// Serialized HTML of the element and its subtree
    fn outer_html(&self, node: NodeId) -> String;

    /// Whether the node belongs to this tree
    fn contains(&self, node: NodeId) -> bool;

    /// All elements below `scope` in document order, excluding `scope` itself
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    /// Elements below `scope` matching `predicate`, in document order
    fn query_all(&self, scope: NodeId, predicate: &dyn Fn(NodeId) -> bool) -> Vec<NodeId> {
        self.descendants(scope).into_iter().filter(|&node| predicate(node)).collect()
    }

    /// First element in the document whose `id` attribute equals `id`
    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let root = self.root();
        if self.attribute(root, "id") == Some(id) {
            return Some(root);
        }
        self.query_all(root, &|node| self.attribute(node, "id") == Some(id))
            .into_iter()
            .next()
    }

    /// Ancestors of `node`, nearest first
    fn ancestors_of(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            out.push(ancestor);
            current = self.parent(ancestor);
        }
        out
    }

    /// The `<body>` element, if the document has one
    fn body(&self) -> Option<NodeId> {
        let root = self.root();
        if self.tag_name(root) == "body" {
            return Some(root);
        }
        self.query_all(root, &|node| self.tag_name(node) == "body")
            .into_iter()
            .next()
    }
}
