//! `extract` command: apply a site's extractor to a saved page.

use std::path::Path;

use pricetrack_extract::{extractor_for, CapturedDocument, Site};

pub(crate) fn handle_extract(site: Site, file: &Path, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let extraction = extractor_for(site).extract(&CapturedDocument::new(file, url));

    println!("--- Extracted Product Data ({}) ---", site.display_name());
    println!("File: {}", file.display());
    println!("Price: {}", extraction.price.as_deref().unwrap_or("-"));
    println!(
        "{}: {}",
        site.identifier_field(),
        extraction.identifier.as_deref().unwrap_or("-")
    );
    Ok(())
}
