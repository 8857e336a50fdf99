//! HTML parser for extracting links
//!
//! Returns the raw `href` values of every anchor in a document. Deciding which
//! of them are worth crawling is left to [`crate::url::parse_link`].

use crate::ParseError;
use scraper::{Html, Selector};

/// Extracts outbound link targets from a document
pub trait LinkParser: Send + Sync {
    fn parse_links(&self, document: &str) -> Result<Vec<String>, ParseError>;
}

/// [`LinkParser`] backed by scraper
#[derive(Debug, Clone)]
pub struct HtmlLinkParser {
    anchors: Selector,
}

impl HtmlLinkParser {
    pub fn new() -> Result<Self, ParseError> {
        let anchors =
            Selector::parse("a[href]").map_err(|e| ParseError::Selector(format!("{:?}", e)))?;
        Ok(Self { anchors })
    }
}

impl LinkParser for HtmlLinkParser {
    fn parse_links(&self, document: &str) -> Result<Vec<String>, ParseError> {
        let document = Html::parse_document(document);

        Ok(document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect())
    }
}

/// Convenience function for extracting anchor hrefs from HTML
///
/// # Example
///
/// ```
/// use ripple_spider::crawler::extract_hrefs;
///
/// let html = r#"<a href="https://example.com/">Home</a><a href="/about">About</a>"#;
/// assert_eq!(extract_hrefs(html), vec!["https://example.com/", "/about"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    HtmlLinkParser::new()
        .and_then(|parser| parser.parse_links(html))
        .unwrap_or_default()
}
