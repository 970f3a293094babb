//! The extraction capability shared by all sites.

use std::path::PathBuf;

use scraper::ElementRef;
use tracing::warn;

use crate::site::Site;

/// Fields extracted from one captured document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub price: Option<String>,
    /// Model number or SKU, depending on the site.
    pub identifier: Option<String>,
}

/// A document saved to disk, with the URL it was captured from.
#[derive(Debug, Clone)]
pub struct CapturedDocument {
    pub path: PathBuf,
    pub url: String,
}

impl CapturedDocument {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Derives price and identifier from a captured page.
pub trait Extractor: Send + Sync {
    fn site(&self) -> Site;

    /// Extract from in-memory markup.
    fn extract_html(&self, html: &str, url: &str) -> Extraction;

    /// Result when the captured file cannot be read.
    fn missing_document(&self, _url: &str) -> Extraction {
        Extraction::default()
    }

    /// Read the captured file and extract from it.
    ///
    /// An unreadable file is logged and yields [`Extractor::missing_document`].
    fn extract(&self, document: &CapturedDocument) -> Extraction {
        match std::fs::read(&document.path) {
            Ok(bytes) => self.extract_html(&String::from_utf8_lossy(&bytes), &document.url),
            Err(e) => {
                warn!(
                    "{}: captured document {} unreadable: {}",
                    self.site().display_name(),
                    document.path.display(),
                    e
                );
                self.missing_document(&document.url)
            }
        }
    }
}

/// Concatenated text of an element, trimmed as a whole.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Concatenation of each text node trimmed, empty nodes dropped.
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Non-empty trimmed lines of an element's text. Text nodes are split on
/// embedded newlines, so one node can yield several lines.
pub(crate) fn stripped_lines(element: ElementRef<'_>) -> Vec<&str> {
    element
        .text()
        .flat_map(|node| node.split('\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_text_helpers() {
        let html = Html::parse_fragment("<div> <b> Item </b>\n <i>model number</i> </div>");
        let div = html.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(stripped_text(div), "Itemmodel number");
        assert_eq!(stripped_lines(div), vec!["Item", "model number"]);
        assert_eq!(element_text(div), "Item \n model number");
    }

    #[test]
    fn test_lines_split_inside_text_node() {
        let html = Html::parse_fragment("<div><span> Now $10.00\n  was $12.00 </span><b>x</b></div>");
        let div = html.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(stripped_lines(div), vec!["Now $10.00", "was $12.00", "x"]);
        assert_eq!(stripped_text(div), "Now $10.00\n  was $12.00x");
    }
}
