use url::Url;

/// Resolves a link href against the page it was found on
///
/// # Resolution Steps
///
/// 1. Trim whitespace; reject empty hrefs
/// 2. Reject `javascript:`, `mailto:`, `tel:` and `data:` links
/// 3. Reject fragment-only links (same-page anchors)
/// 4. Join against the base URL
/// 5. Reject anything that is not HTTP(S) after joining
/// 6. Drop the fragment so anchors on one page collapse to one URL
///
/// # Returns
///
/// * `Some(Url)` - The absolute URL to consider for crawling
/// * `None` - The link should be ignored
///
/// # Examples
///
/// ```
/// use recipe_crawler::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/recipes/").unwrap();
/// let resolved = resolve_link("../recipe/soup#steps", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/recipe/soup");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/recipes/page").unwrap()
    }

    #[test]
    fn test_absolute_link() {
        let resolved = resolve_link("https://other.com/recipe/b", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://other.com/recipe/b");
    }

    #[test]
    fn test_root_relative_link() {
        let resolved = resolve_link("/recipe/a", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/recipe/a");
    }

    #[test]
    fn test_path_relative_link() {
        let resolved = resolve_link("other", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/recipes/other");
    }

    #[test]
    fn test_protocol_relative_link() {
        let resolved = resolve_link("//cdn.example.com/x", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://cdn.example.com/x");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let resolved = resolve_link("  /recipe/a\n", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/recipe/a");
    }

    #[test]
    fn test_fragment_removed() {
        let resolved = resolve_link("/recipe/a#reviews", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/recipe/a");
        assert!(resolved.fragment().is_none());
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_link("javascript:void(0)", &base_url()).is_none());
        assert!(resolve_link("JavaScript:void(0)", &base_url()).is_none());
        assert!(resolve_link("mailto:chef@example.com", &base_url()).is_none());
        assert!(resolve_link("tel:+1234567890", &base_url()).is_none());
        assert!(resolve_link("data:text/html,<h1>x</h1>", &base_url()).is_none());
        assert!(resolve_link("ftp://example.com/file", &base_url()).is_none());
    }

    #[test]
    fn test_skip_empty_and_fragment_only() {
        assert!(resolve_link("", &base_url()).is_none());
        assert!(resolve_link("   ", &base_url()).is_none());
        assert!(resolve_link("#top", &base_url()).is_none());
    }
}
