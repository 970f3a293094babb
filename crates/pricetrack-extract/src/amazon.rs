//! Amazon product pages.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::extractor::{element_text, stripped_text, Extraction, Extractor};
use crate::site::Site;

static PRICE_WHOLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price-whole").unwrap());
static PRICE_FRACTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price-fraction").unwrap());
static PRICE_SYMBOL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price-symbol").unwrap());
static TABLE_HEADER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

const MODEL_LABEL: &str = "item model number";

/// Price from the `a-price` fragments, model from the product details table.
pub struct AmazonExtractor;

impl AmazonExtractor {
    /// `symbol + whole + "." + fraction`; both whole and fraction are required.
    /// `a-price-whole` nests an `a-price-decimal` span holding the point, which
    /// is dropped so the result has a single `.`.
    fn price(document: &Html) -> Option<String> {
        let whole = document.select(&PRICE_WHOLE).next()?;
        let fraction = document.select(&PRICE_FRACTION).next()?;
        let symbol = document
            .select(&PRICE_SYMBOL)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let whole = element_text(whole);
        let whole = whole.trim_end_matches('.');
        Some(format!("{}{}.{}", symbol, whole, element_text(fraction)))
    }

    /// Value cell next to the "Item model number" label.
    fn model(document: &Html) -> Option<String> {
        let label = document
            .select(&TABLE_HEADER)
            .find(|th| stripped_text(*th).to_lowercase().contains(MODEL_LABEL))?;

        label
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| sibling.value().name() == "td")
            .map(stripped_text)
    }
}

impl Extractor for AmazonExtractor {
    fn site(&self) -> Site {
        Site::Amazon
    }

    fn extract_html(&self, html: &str, _url: &str) -> Extraction {
        let document = Html::parse_document(html);
        let extraction = Extraction {
            price: Self::price(&document),
            identifier: Self::model(&document).filter(|m| !m.is_empty()),
        };
        debug!(
            "Amazon extraction: price={:?} model={:?}",
            extraction.price, extraction.identifier
        );
        extraction
    }
}
