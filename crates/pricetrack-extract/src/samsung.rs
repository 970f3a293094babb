//! Samsung product pages.
//!
//! The price comes from the storage option radios inside `#device_info`;
//! the SKU comes from the URL alone.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::extractor::{stripped_lines, Extraction, Extractor};
use crate::site::Site;

static DEVICE_INFO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#device_info").unwrap());
static RADIO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[role="radio"]"#).unwrap());

static DOLLAR_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*[\d,]+\.\d{2}").unwrap());
static SKU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)sku-([A-Za-z0-9-]+)").unwrap());

/// Storage option fallback when no radio is checked.
const PREFERRED_CAPACITY: &str = "512";

/// SKU embedded in a Samsung product URL as `sku-<id>`.
pub fn sku_from_url(url: &str) -> Option<String> {
    SKU.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Checked storage option radio, else the 512 GB one.
pub struct SamsungExtractor;

impl SamsungExtractor {
    fn selected_option<'a>(container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let radios: Vec<_> = container.select(&RADIO).collect();
        radios
            .iter()
            .find(|r| r.value().attr("aria-checked") == Some("true"))
            .or_else(|| {
                radios
                    .iter()
                    .find(|r| r.text().collect::<String>().contains(PREFERRED_CAPACITY))
            })
            .copied()
    }

    /// First dollar amount on a line without "was", else the last amount
    /// anywhere in the option.
    fn option_price(option: ElementRef<'_>) -> Option<String> {
        let lines = stripped_lines(option);

        let current = lines
            .iter()
            .filter(|line| line.contains('$') && !line.to_lowercase().contains("was"))
            .find_map(|line| DOLLAR_AMOUNT.find(line))
            .map(|m| m.as_str().to_string());

        current.or_else(|| {
            let text = lines.join("\n");
            DOLLAR_AMOUNT
                .find_iter(&text)
                .last()
                .map(|m| m.as_str().to_string())
        })
    }

    fn price(document: &Html) -> Option<String> {
        let Some(container) = document.select(&DEVICE_INFO).next() else {
            debug!("Samsung: #device_info not found in document");
            return None;
        };
        let Some(option) = Self::selected_option(container) else {
            debug!("Samsung: no selected or {} GB option", PREFERRED_CAPACITY);
            return None;
        };
        Self::option_price(option)
    }
}

impl Extractor for SamsungExtractor {
    fn site(&self) -> Site {
        Site::Samsung
    }

    fn extract_html(&self, html: &str, url: &str) -> Extraction {
        let document = Html::parse_document(html);
        let extraction = Extraction {
            price: Self::price(&document),
            identifier: sku_from_url(url),
        };
        debug!(
            "Samsung extraction: price={:?} sku={:?}",
            extraction.price, extraction.identifier
        );
        extraction
    }

    fn missing_document(&self, url: &str) -> Extraction {
        Extraction {
            price: None,
            identifier: sku_from_url(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const URL: &str = "https://www.samsung.com/us/smartphones/galaxy-s25-ultra/buy/galaxy-s25-ultra-512gb-unlocked-sku-sm-s938uzkexaa/";

    fn page(radios: &str) -> String {
        format!(r#"<html><body><div id="device_info">{}</div></body></html>"#, radios)
    }

    #[test]
    fn test_prefers_price_without_was() {
        let html = page(
            r#"<div role="radio" aria-checked="true">
                 <span>512GB</span><span>$1,299.99</span><span>was: $1,399.99</span>
               </div>"#,
        );
        let result = SamsungExtractor.extract_html(&html, URL);
        assert_eq!(result.price.as_deref(), Some("$1,299.99"));
    }

    #[test]
    fn test_was_line_first_still_skipped() {
        let html = page(
            r#"<div role="radio" aria-checked="true">
                 <span>Was $1,399.99</span><span>$1,299.99</span>
               </div>"#,
        );
        let result = SamsungExtractor.extract_html(&html, URL);
        assert_eq!(result.price.as_deref(), Some("$1,299.99"));
    }

    #[test]
    fn test_was_price_in_same_text_node() {
        let html = page(
            "<div role=\"radio\" aria-checked=\"true\"><span>Now $1,299.99\nwas $1,399.99</span></div>",
        );
        let result = SamsungExtractor.extract_html(&html, URL);
        assert_eq!(result.price.as_deref(), Some("$1,299.99"));
    }

    #[test]
    fn test_falls_back_to_last_amount() {
        let html = page(
            r#"<div role="radio" aria-checked="true">
                 <span>was $1,399.99</span><span>was $1,349.99</span>
               </div>"#,
        );
        let result = SamsungExtractor.extract_html(&html, URL);
        assert_eq!(result.price.as_deref(), Some("$1,349.99"));
    }

    #[test]
    fn test_checked_radio_preferred_over_512() {
        let html = page(
            r#"<div role="radio" aria-checked="false"><span>512GB</span><span>$1,419.99</span></div>
               <div role="radio" aria-checked="true"><span>256GB</span><span>$1,299.99</span></div>"#,
        );
        let result = SamsungExtractor.extract_html(&html, URL);
        assert_eq!(result.price.as_deref(), Some("$1,299.99"));
    }

    #[test]
    fn test_falls_back_to_512_option() {
        let html = page(
            r#"<div role="radio"><span>256GB</span><span>$1,299.99</span></div>
               <div role="radio"><span>512GB</span><span>$1,419.99</span></div>"#,
        );
        let result = SamsungExtractor.extract_html(&html, URL);
        assert_eq!(result.price.as_deref(), Some("$1,419.99"));
    }

    #[test]
    fn test_no_matching_option_yields_no_price() {
        let html = page(r#"<div role="radio"><span>256GB</span><span>$1,299.99</span></div>"#);
        assert_eq!(SamsungExtractor.extract_html(&html, URL).price, None);
    }

    #[test]
    fn test_missing_device_info() {
        let result = SamsungExtractor.extract_html("<html><body></body></html>", URL);
        assert_eq!(result.price, None);
        assert_eq!(result.identifier.as_deref(), Some("sm-s938uzkexaa"));
    }

    #[test]
    fn test_sku_from_url() {
        assert_eq!(sku_from_url(URL).as_deref(), Some("sm-s938uzkexaa"));
        assert_eq!(
            sku_from_url("https://x/SKU-SM-F966UDBEXAA?ref=1").as_deref(),
            Some("SM-F966UDBEXAA")
        );
        assert_eq!(sku_from_url("https://www.samsung.com/us/"), None);
        assert_eq!(sku_from_url(""), None);
    }

    #[test]
    fn test_extract_reads_captured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let html = page(r#"<div role="radio" aria-checked="true"><span>$999.99</span></div>"#);
        file.write_all(html.as_bytes()).unwrap();

        let doc = crate::CapturedDocument::new(file.path(), URL);
        let result = SamsungExtractor.extract(&doc);
        assert_eq!(result.price.as_deref(), Some("$999.99"));
    }

    #[test]
    fn test_missing_file_keeps_url_sku() {
        let doc = crate::CapturedDocument::new("/nonexistent/samsung_1.html", URL);
        let result = SamsungExtractor.extract(&doc);
        assert_eq!(result.price, None);
        assert_eq!(result.identifier.as_deref(), Some("sm-s938uzkexaa"));
    }
}
