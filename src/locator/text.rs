/// Collapse whitespace runs to a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize and drop the value entirely when nothing is left
pub fn non_empty(text: &str) -> Option<String> {
    let normalized = normalize_whitespace(text);
    (!normalized.is_empty()).then_some(normalized)
}

/// Wrap a value in single quotes, escaping backslashes and quotes
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Submit \n\t Order  "), "Submit Order");
        assert_eq!(normalize_whitespace("a\u{a0}\u{a0}b"), "a b");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(" x  y "), Some("x y".to_string()));
        assert_eq!(non_empty("\n\t"), None);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("Save"), "'Save'");
        assert_eq!(quote("Don't"), r"'Don\'t'");
        assert_eq!(quote(r"C:\tmp"), r"'C:\\tmp'");
    }
}
