//! Price and identifier extraction for the supported retail sites.
//!
//! Extraction always runs against a document that was captured to disk
//! first, so every extractor can be exercised against fixture files.

mod amazon;
mod bestbuy;
mod extractor;
mod samsung;
mod site;

pub use amazon::AmazonExtractor;
pub use bestbuy::{BestBuyExtractor, MODEL_NOT_FOUND, PRICE_NOT_FOUND};
pub use extractor::{CapturedDocument, Extraction, Extractor};
pub use samsung::{sku_from_url, SamsungExtractor};
pub use site::{Site, UnknownSite};

/// The extractor for a site.
pub fn extractor_for(site: Site) -> Box<dyn Extractor> {
    match site {
        Site::Amazon => Box::new(AmazonExtractor),
        Site::BestBuy => Box::new(BestBuyExtractor),
        Site::Samsung => Box::new(SamsungExtractor),
    }
}
