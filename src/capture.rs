use crate::dom::{DocumentTree, DomTree, NodeId};
use crate::error::{LocatorError, Result};
use crate::locator::{ElementDescription, SelectorMap, describe};

/// Capture state for one document: the current target and what was captured so far
///
/// The target is whatever the user last pointed at (right-click, selector,
/// snapshot marker). It belongs to this session, not to any global.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    tree: DomTree,
    target: Option<NodeId>,
    captured: SelectorMap,
}

impl CaptureSession {
    pub fn new(tree: DomTree) -> Self {
        Self {
            tree,
            target: None,
            captured: SelectorMap::new(),
        }
    }

    /// Start a session over an HTML document
    pub fn from_html(html: &str) -> Self {
        Self::new(DomTree::from_html(html))
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Current target, if any
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Point the session at an element of its document
    pub fn set_target(&mut self, node: NodeId) -> Result<()> {
        if !self.tree.contains(node) {
            return Err(LocatorError::ElementNotFound(format!(
                "node {} is not part of this document",
                node.index()
            )));
        }
        self.target = Some(node);
        Ok(())
    }

    /// Target the first element matching a CSS selector
    pub fn target_by_selector(&mut self, selector: &str) -> Result<NodeId> {
        let matches = self.tree.select(selector)?;
        let node = *matches
            .first()
            .ok_or_else(|| LocatorError::ElementNotFound(format!("no element matches '{}'", selector)))?;

        if matches.len() > 1 {
            log::warn!("selector '{}' matched {} elements, using the first", selector, matches.len());
        }

        self.target = Some(node);
        Ok(node)
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Describe the current target and record it in the selector map
    pub fn capture(&mut self) -> Result<ElementDescription> {
        let node = self.target.ok_or(LocatorError::NoTarget)?;
        let description = describe(&self.tree, node);
        let key = self.captured.register(&description);
        log::debug!("captured {} from {}", key, description.page_key);
        Ok(description)
    }

    /// Elements captured in this session, keyed by element key
    pub fn captured(&self) -> &SelectorMap {
        &self.captured
    }
}
