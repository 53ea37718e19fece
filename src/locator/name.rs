use crate::dom::{DocumentTree, NodeId};
use crate::locator::text::non_empty;
use serde::Serialize;

/// Where an accessible name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    AriaLabel,
    AriaLabelledBy,
    Alt,
    Label,
    Placeholder,
    Title,
    TextContent,
}

type NameStrategy = fn(&dyn DocumentTree, NodeId) -> Option<String>;

/// Name signals in priority order
const STRATEGIES: [(NameSource, NameStrategy); 7] = [
    (NameSource::AriaLabel, aria_label),
    (NameSource::AriaLabelledBy, aria_labelledby),
    (NameSource::Alt, alt_text),
    (NameSource::Label, label_text),
    (NameSource::Placeholder, placeholder),
    (NameSource::Title, title_attribute),
    (NameSource::TextContent, own_text),
];

/// Resolve the accessible name; the first non-empty signal wins
pub fn resolve_name(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    resolve_name_with_source(tree, node).map(|(name, _)| name)
}

/// Like [`resolve_name`], also reporting which signal produced the name
pub fn resolve_name_with_source(tree: &dyn DocumentTree, node: NodeId) -> Option<(String, NameSource)> {
    STRATEGIES
        .iter()
        .find_map(|(source, strategy)| strategy(tree, node).map(|name| (name, *source)))
}

pub fn aria_label(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    tree.attribute(node, "aria-label").and_then(non_empty)
}

/// Text of the elements referenced by `aria-labelledby`, joined by spaces
pub fn aria_labelledby(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    let ids = tree.attribute(node, "aria-labelledby")?;
    let text = ids
        .split_whitespace()
        .filter_map(|id| tree.find_by_id(id))
        .map(|referenced| tree.text_content(referenced))
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(&text)
}

/// `alt` text, for images only
pub fn alt_text(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    if tree.tag_name(node) != "img" {
        return None;
    }
    tree.attribute(node, "alt").and_then(non_empty)
}

/// Text of the `<label for=id>` pointing at the element, else of the nearest ancestor `<label>`
pub fn label_text(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    let by_for = tree
        .attribute(node, "id")
        .filter(|id| !id.is_empty())
        .and_then(|id| {
            tree.query_all(tree.root(), &|candidate| {
                tree.tag_name(candidate) == "label" && tree.attribute(candidate, "for") == Some(id)
            })
            .into_iter()
            .next()
        })
        .and_then(|label| non_empty(&tree.text_content(label)));

    by_for.or_else(|| {
        tree.ancestors_of(node)
            .into_iter()
            .find(|&ancestor| tree.tag_name(ancestor) == "label")
            .and_then(|label| non_empty(&tree.text_content(label)))
    })
}

pub fn placeholder(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    tree.attribute(node, "placeholder").and_then(non_empty)
}

pub fn title_attribute(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    tree.attribute(node, "title").and_then(non_empty)
}

/// The element's own text content
pub fn own_text(tree: &dyn DocumentTree, node: NodeId) -> Option<String> {
    non_empty(&tree.text_content(node))
}
