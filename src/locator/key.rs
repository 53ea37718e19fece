use crate::locator::candidate::SelectorKind;
use url::Url;

/// Maximum length of element and page keys
pub const MAX_KEY_LEN: usize = 40;

/// Build the compact element key, e.g. `button_submit_order`
///
/// The base is the accessible name, else the id, else the tag name; it is
/// prefixed by the role when there is one.
pub fn element_key(
    role: Option<&str>,
    name: Option<&str>,
    id: Option<&str>,
    tag_name: &str,
    first_kind: Option<SelectorKind>,
) -> String {
    let base = name
        .filter(|n| !n.is_empty())
        .or(id.filter(|i| !i.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| tag_name.to_ascii_lowercase());

    let joined = match role.map(sanitize).filter(|r| !r.is_empty()) {
        Some(role) => format!("{}_{}", role, sanitize(&base)),
        None => sanitize(&base),
    };

    let key = finish(&joined);
    if key.is_empty() {
        let kind = first_kind.map_or("element", |k| k.as_str());
        return format!("element_{}", kind.to_ascii_lowercase());
    }
    key
}

/// Build the page key from the URL host and path, else from the title
pub fn page_key(url: &str, title: &str) -> String {
    let from_url = Url::parse(url).ok().map(|parsed| {
        let host = parsed.host_str().unwrap_or("");
        let host = host.strip_prefix("www.").unwrap_or(host);
        let mut parts: Vec<&str> = host.split('.').collect();
        if let Some(segments) = parsed.path_segments() {
            parts.extend(segments.filter(|s| !s.is_empty()));
        }
        finish(&sanitize(&parts.join(" ")))
    });

    from_url
        .filter(|key| !key.is_empty())
        .or_else(|| Some(finish(&sanitize(title))).filter(|key| !key.is_empty()))
        .unwrap_or_else(|| "page".to_string())
}

/// Keep `[A-Za-z0-9\s_-]`, join words with underscores and lowercase
fn sanitize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_lowercase()
        .replace('-', "_")
}

/// Collapse underscore runs, trim them from the ends and cap the length
fn finish(key: &str) -> String {
    let mut collapsed = String::with_capacity(key.len());
    for c in key.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.trim_matches('_');
    let capped: String = trimmed.chars().take(MAX_KEY_LEN).collect();
    capped.trim_end_matches('_').to_string()
}
