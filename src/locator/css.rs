use crate::dom::{DocumentTree, NodeId};

/// How many levels, the element included, the fallback path spans
pub const MAX_PATH_DEPTH: usize = 4;

/// Build the CSS fallback selector for an element
///
/// Uses `#id` when the element has an id, otherwise a short structural path
/// of `tag.class:nth-of-type(n)` segments joined with `" > "`.
pub fn css_fallback(tree: &dyn DocumentTree, node: NodeId) -> String {
    if let Some(id) = tree.attribute(node, "id").filter(|id| !id.is_empty()) {
        return format!("#{}", css_escape(id));
    }

    let mut segments = Vec::with_capacity(MAX_PATH_DEPTH);
    let mut current = Some(node);
    while let Some(element) = current {
        if segments.len() == MAX_PATH_DEPTH {
            break;
        }
        segments.push(path_segment(tree, element));
        current = tree.parent(element);
    }

    segments.reverse();
    segments.join(" > ")
}

/// `tag[.class...][:nth-of-type(n)]` for one element
pub fn path_segment(tree: &dyn DocumentTree, node: NodeId) -> String {
    let mut segment = tree.tag_name(node).to_string();

    if let Some(classes) = tree.attribute(node, "class") {
        for class in classes.split_whitespace() {
            segment.push('.');
            segment.push_str(&css_escape(class));
        }
    }

    if let Some(position) = nth_of_type(tree, node) {
        segment.push_str(&format!(":nth-of-type({})", position));
    }

    segment
}

/// 1-based index among same-tag siblings, `None` when the tag is unique in its parent
pub fn nth_of_type(tree: &dyn DocumentTree, node: NodeId) -> Option<usize> {
    let parent = tree.parent(node)?;
    let tag = tree.tag_name(node);
    let same_tag: Vec<NodeId> = tree
        .children(parent)
        .into_iter()
        .filter(|&sibling| tree.tag_name(sibling) == tag)
        .collect();

    if same_tag.len() < 2 {
        return None;
    }
    same_tag.iter().position(|&sibling| sibling == node).map(|i| i + 1)
}

/// Escape a string for use as a CSS identifier, following `CSS.escape`
pub fn css_escape(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len());

    if chars == ['-'] {
        return "\\-".to_string();
    }

    for (i, &c) in chars.iter().enumerate() {
        let starts_with_digit = c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => out.push_str(&format!("\\{:x} ", c as u32)),
            _ if starts_with_digit => out.push_str(&format!("\\{:x} ", c as u32)),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => out.push(c),
            _ => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomTree;

    fn fallback_for(html: &str, selector: &str) -> String {
        let tree = DomTree::from_html(html);
        let node = tree.select(selector).unwrap()[0];
        css_fallback(&tree, node)
    }

    #[test]
    fn test_id_selector() {
        assert_eq!(fallback_for(r#"<button id="submit-btn">Go</button>"#, "button"), "#submit-btn");
        assert_eq!(fallback_for(r#"<div id="1st">x</div>"#, "div"), r"#\31 st");
        assert_eq!(fallback_for(r#"<div id="a.b:c">x</div>"#, "div"), r"#a\.b\:c");
    }

    #[test]
    fn test_empty_id_uses_path() {
        let path = fallback_for(r#"<body><p id="">x</p></body>"#, "p");
        assert_eq!(path, "html > body > p");
    }

    #[test]
    fn test_path_is_limited_to_four_levels() {
        let html = r#"
            <body>
              <main>
                <section class="cart items">
                  <ul>
                    <li>One</li>
                    <li>Two</li>
                    <li class="last">Three</li>
                  </ul>
                </section>
              </main>
            </body>
        "#;
        let path = fallback_for(html, "li.last");
        assert_eq!(path, "main > section.cart.items > ul > li.last:nth-of-type(3)");
    }

    #[test]
    fn test_nth_of_type_counts_same_tag_only() {
        let html = "<body><div><span>a</span><b>b</b><span>c</span><em>d</em></div></body>";
        let tree = DomTree::from_html(html);

        let spans = tree.select("span").unwrap();
        assert_eq!(nth_of_type(&tree, spans[0]), Some(1));
        assert_eq!(nth_of_type(&tree, spans[1]), Some(2));

        let em = tree.select("em").unwrap()[0];
        assert_eq!(nth_of_type(&tree, em), None);
        assert_eq!(nth_of_type(&tree, tree.root()), None);
    }

    #[test]
    fn test_path_stops_at_root() {
        let tree = DomTree::from_html("<p>x</p>");
        let body = tree.body().unwrap();
        assert_eq!(css_fallback(&tree, body), "html > body");
    }

    #[test]
    fn test_css_escape() {
        assert_eq!(css_escape("plain_name-1"), "plain_name-1");
        assert_eq!(css_escape("-"), r"\-");
        assert_eq!(css_escape("-2x"), r"-\32 x");
        assert_eq!(css_escape("a b"), r"a\ b");
        assert_eq!(css_escape("é"), "é");
    }
}
