//! URL handling module for Ripple-Spider
//!
//! The crawler only ever works with absolute `http` or `https` addresses. This
//! module decides whether a seed or a discovered href qualifies.

use crate::UrlError;
use url::{ParseError, Url};

/// Returns true if the scheme is one the crawler will fetch
pub fn is_crawlable_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

/// Parses an href found in a document into a crawlable URL
///
/// Hrefs are not resolved against the page they were found on: a relative
/// href is rejected rather than joined to its base.
///
/// # Arguments
///
/// * `href` - The raw attribute value
///
/// # Returns
///
/// * `Ok(Url)` - An absolute http(s) URL
/// * `Err(UrlError::Relative)` - The href has no scheme
/// * `Err(UrlError::InvalidScheme)` - The href uses something other than http(s)
/// * `Err(UrlError::Parse)` - The href could not be parsed at all
///
/// # Examples
///
/// ```
/// use ripple_spider::url::parse_link;
///
/// assert!(parse_link("https://example.com/about").is_ok());
/// assert!(parse_link("/about").is_err());
/// assert!(parse_link("mailto:someone@example.com").is_err());
/// ```
pub fn parse_link(href: &str) -> Result<Url, UrlError> {
    let href = href.trim();

    let url = Url::parse(href).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => UrlError::Relative(href.to_string()),
        other => UrlError::Parse {
            url: href.to_string(),
            message: other.to_string(),
        },
    })?;

    if !is_crawlable_scheme(url.scheme()) {
        return Err(UrlError::InvalidScheme {
            url: href.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    Ok(url)
}

/// Parses the operator-supplied seed URL
///
/// The seed follows the same rules as discovered links.
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    parse_link(seed)
}
