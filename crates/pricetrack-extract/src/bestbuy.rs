//! BestBuy product pages.
//!
//! Missing fields are reported with literal sentinels instead of `None`.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use crate::extractor::{stripped_text, Extraction, Extractor};
use crate::site::Site;

pub const PRICE_NOT_FOUND: &str = "Price not found";
pub const MODEL_NOT_FOUND: &str = "Model number not found";

static CUSTOMER_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="price-block-customer-price"] span"#).unwrap()
});
static DISCLAIMER_MODEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".disclaimer .inline-block").unwrap());

/// Customer price block and the "Model:" disclaimer line.
pub struct BestBuyExtractor;

impl Extractor for BestBuyExtractor {
    fn site(&self) -> Site {
        Site::BestBuy
    }

    fn extract_html(&self, html: &str, _url: &str) -> Extraction {
        let document = Html::parse_document(html);

        let price = document
            .select(&CUSTOMER_PRICE)
            .next()
            .map(stripped_text)
            .unwrap_or_else(|| PRICE_NOT_FOUND.to_string());

        let model = document
            .select(&DISCLAIMER_MODEL)
            .next()
            .map(|el| stripped_text(el).replace("Model:", "").trim().to_string())
            .unwrap_or_else(|| MODEL_NOT_FOUND.to_string());

        debug!("BestBuy extraction: price={} model={}", price, model);
        Extraction {
            price: Some(price),
            identifier: Some(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_and_model() {
        let html = r#"
            <div data-testid="price-block-customer-price"><span>$1,299.99</span></div>
            <div class="disclaimer"><span class="inline-block">Model: SM-S938UZBEXAA</span></div>
        "#;
        let result = BestBuyExtractor.extract_html(html, "");
        assert_eq!(result.price.as_deref(), Some("$1,299.99"));
        assert_eq!(result.identifier.as_deref(), Some("SM-S938UZBEXAA"));
    }

    #[test]
    fn test_missing_markers_yield_sentinels() {
        let result = BestBuyExtractor.extract_html("<html><body></body></html>", "");
        assert_eq!(result.price.as_deref(), Some(PRICE_NOT_FOUND));
        assert_eq!(result.identifier.as_deref(), Some(MODEL_NOT_FOUND));
    }

    #[test]
    fn test_first_price_span_wins() {
        let html = r#"
            <div data-testid="price-block-customer-price">
              <span> $999.99 </span><span>$1,099.99</span>
            </div>
        "#;
        let result = BestBuyExtractor.extract_html(html, "");
        assert_eq!(result.price.as_deref(), Some("$999.99"));
    }

    #[test]
    fn test_missing_document_is_null_pair() {
        let doc = crate::CapturedDocument::new("/nonexistent/bestbuy_1.html", "https://www.bestbuy.com/x");
        assert_eq!(BestBuyExtractor.extract(&doc), Extraction::default());
    }
}
