use crate::ConfigError;
use regex::Regex;
use std::fmt;
use url::Url;

/// Default pattern: recipe detail pages live under `/recipe/`
pub const DEFAULT_LINK_PATTERN: &str = "/recipe/";

/// A path-matching predicate deciding which links are worth following
///
/// The pattern is a regular expression searched (not anchored) in the URL
/// path, so the plain string `/recipe/` behaves as "path contains /recipe/"
/// while `^/recipe/\w+$` gives full control.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    regex: Regex,
}

impl LinkPattern {
    /// Compiles a link pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_crawler::url::LinkPattern;
    /// use url::Url;
    ///
    /// let pattern = LinkPattern::new("/recipe/").unwrap();
    /// assert!(pattern.matches(&Url::parse("https://example.com/recipe/a").unwrap()));
    /// assert!(!pattern.matches(&Url::parse("https://example.com/recipes/").unwrap()));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "Link pattern cannot be empty".to_string(),
            ));
        }

        let regex = Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))?;

        Ok(Self { regex })
    }

    /// Returns true if the URL's path matches the pattern
    pub fn matches(&self, url: &Url) -> bool {
        self.regex.is_match(url.path())
    }

    /// The source text of the pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Display for LinkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}
