use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// The site identity of a URL: scheme, host and effective port
///
/// Two URLs belong to the same site iff their origins are equal. The port is
/// the explicit port or the scheme's known default, so `http://a.com` and
/// `http://a.com:80` share an origin while `http://a.com:8080` does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// The URL scheme, e.g. `https`
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The lowercase host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The explicit port, or the scheme default when the URL has none
    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) if Some(port) != default_port(&self.scheme) => {
                write!(f, "{}://{}:{}/", self.scheme, self.host, port)
            }
            _ => write!(f, "{}://{}/", self.scheme, self.host),
        }
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Computes the origin of a parsed URL
///
/// # Returns
///
/// * `Ok(Origin)` - The URL's scheme, lowercase host and effective port
/// * `Err(UrlError::MissingHost)` - The URL has no host (e.g. `mailto:`)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use recipe_crawler::url::origin_of;
///
/// let origin = origin_of(&Url::parse("https://EXAMPLE.com/recipe/1").unwrap()).unwrap();
/// assert_eq!(origin.host(), "example.com");
/// assert_eq!(origin.to_string(), "https://example.com/");
/// ```
pub fn origin_of(url: &Url) -> UrlResult<Origin> {
    let host = url.host_str().ok_or(UrlError::MissingHost)?;

    Ok(Origin {
        scheme: url.scheme().to_string(),
        host: host.to_lowercase(),
        port: url.port_or_known_default(),
    })
}

/// Parses a URL string and computes its origin
///
/// This is the seed-URL entry point: a string that cannot be parsed, is not
/// HTTP(S), or has no host yields an error. The returned URL has its fragment
/// removed, the same canonical form `resolve_link` gives discovered links.
pub fn parse_origin(url_str: &str) -> UrlResult<(Url, Origin)> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    url.set_fragment(None);

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let origin = origin_of(&url)?;
    Ok((url, origin))
}

/// Returns true if both URLs have the same origin
///
/// URLs without a host never share an origin with anything.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    match (origin_of(a), origin_of(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_origin_of_simple() {
        let origin = origin_of(&parse("https://example.com/recipes/")).unwrap();
        assert_eq!(origin.scheme(), "https");
        assert_eq!(origin.host(), "example.com");
        assert_eq!(origin.port(), Some(443));
    }

    #[test]
    fn test_origin_of_uppercase_host() {
        let origin = origin_of(&parse("https://EXAMPLE.COM/")).unwrap();
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_origin_of_without_host() {
        let result = origin_of(&parse("mailto:cook@example.com"));
        assert!(matches!(result, Err(UrlError::MissingHost)));
    }

    #[test]
    fn test_origin_display() {
        let origin = origin_of(&parse("https://example.com/recipe/a?x=1")).unwrap();
        assert_eq!(origin.to_string(), "https://example.com/");

        let origin = origin_of(&parse("http://127.0.0.1:8080/a")).unwrap();
        assert_eq!(origin.to_string(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_parse_origin_drops_fragment() {
        let (seed, _) = parse_origin("https://example.com/recipe/a#reviews").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/recipe/a");
        assert_eq!(
            Some(seed),
            crate::url::resolve_link("/recipe/a", &parse("https://example.com/recipes/"))
        );
    }

    #[test]
    fn test_parse_origin_rejects_garbage() {
        assert!(matches!(
            parse_origin("not a url"),
            Err(UrlError::Parse(_))
        ));
        assert!(matches!(
            parse_origin("ftp://example.com/"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_same_origin_reflexive() {
        let a = parse("https://example.com/recipe/a");
        assert!(same_origin(&a, &a));
    }

    #[test]
    fn test_same_origin_symmetric() {
        let a = parse("https://example.com/recipe/a");
        let b = parse("https://example.com/about");
        let c = parse("https://other.com/recipe/b");

        assert_eq!(same_origin(&a, &b), same_origin(&b, &a));
        assert_eq!(same_origin(&a, &c), same_origin(&c, &a));
        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
    }

    #[test]
    fn test_same_origin_under_relative_resolution() {
        let page = parse("https://example.com/recipes/index.html");
        for href in ["/recipe/a", "recipe/b", "../about", "?page=2", "//example.com/x"] {
            let resolved = page.join(href).unwrap();
            assert!(same_origin(&page, &resolved), "{} left the origin", href);
        }
    }

    #[test]
    fn test_scheme_and_port_matter() {
        let https = parse("https://example.com/");
        let http = parse("http://example.com/");
        let explicit_default = parse("http://example.com:80/");
        let other_port = parse("http://example.com:8080/");

        assert!(!same_origin(&https, &http));
        assert!(same_origin(&http, &explicit_default));
        assert!(!same_origin(&http, &other_port));
    }

    #[test]
    fn test_subdomain_is_different_origin() {
        let a = parse("https://example.com/");
        let b = parse("https://www.example.com/");
        assert!(!same_origin(&a, &b));
    }
}
