//! Supported sites.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Unknown site '{0}' (expected amazon, bestbuy or samsung)")]
pub struct UnknownSite(pub String);

/// A supported retail site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Amazon,
    BestBuy,
    Samsung,
}

impl Site {
    /// Pipeline run order.
    pub const ALL: [Site; 3] = [Site::Amazon, Site::BestBuy, Site::Samsung];

    /// Lowercase name used in file names and record keys.
    pub fn name(self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::BestBuy => "bestbuy",
            Site::Samsung => "samsung",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Site::Amazon => "Amazon",
            Site::BestBuy => "BestBuy",
            Site::Samsung => "Samsung",
        }
    }

    /// Record field holding the product identifier.
    pub fn identifier_field(self) -> &'static str {
        match self {
            Site::Amazon | Site::BestBuy => "model",
            Site::Samsung => "sku",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "amazon" => Ok(Site::Amazon),
            "bestbuy" => Ok(Site::BestBuy),
            "samsung" => Ok(Site::Samsung),
            _ => Err(UnknownSite(s.to_string())),
        }
    }
}
