//! Per-site pipeline configuration.
//!
//! Each site carries its own defaults. A `[sites.<name>]` table in the
//! config file is overlaid onto those defaults key by key, so overriding
//! `urls` alone keeps the site's waits and pacing intact.

use std::path::PathBuf;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Page readiness signal awaited after navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSignal {
    /// `document.readyState == "complete"`.
    #[default]
    Load,
    /// `document.readyState` is `interactive` or later.
    DomContentLoaded,
}

/// Human-like interaction pacing applied after navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingConfig {
    pub settle_min_ms: u64,
    pub settle_max_ms: u64,
    pub mouse_moves: u32,
    pub mouse_x_min: u32,
    pub mouse_x_max: u32,
    pub mouse_y_min: u32,
    pub mouse_y_max: u32,
    pub move_steps_min: u32,
    pub move_steps_max: u32,
    pub move_pause_min_ms: u64,
    pub move_pause_max_ms: u64,
    pub scrolls: u32,
    pub scroll_min_px: u32,
    pub scroll_max_px: u32,
    pub scroll_pause_min_ms: u64,
    pub scroll_pause_max_ms: u64,
}

impl PacingConfig {
    /// Settle, three pointer moves and two scrolls.
    pub fn browsing() -> Self {
        Self {
            settle_min_ms: 3000,
            settle_max_ms: 6000,
            mouse_moves: 3,
            mouse_x_min: 200,
            mouse_x_max: 800,
            mouse_y_min: 200,
            mouse_y_max: 600,
            move_steps_min: 5,
            move_steps_max: 15,
            move_pause_min_ms: 300,
            move_pause_max_ms: 1500,
            scrolls: 2,
            scroll_min_px: 400,
            scroll_max_px: 1000,
            scroll_pause_min_ms: 1000,
            scroll_pause_max_ms: 3000,
        }
    }

    /// A short fixed yield with no pointer activity.
    pub fn minimal() -> Self {
        Self {
            settle_min_ms: 100,
            settle_max_ms: 100,
            mouse_moves: 0,
            scrolls: 0,
            ..Self::browsing()
        }
    }

    /// No delays and no interaction at all.
    pub fn none() -> Self {
        Self {
            settle_min_ms: 0,
            settle_max_ms: 0,
            mouse_moves: 0,
            move_pause_min_ms: 0,
            move_pause_max_ms: 0,
            scrolls: 0,
            scroll_pause_min_ms: 0,
            scroll_pause_max_ms: 0,
            ..Self::browsing()
        }
    }
}

/// One site's pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Product pages, processed in order.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Session state (cookies) JSON file.
    pub session_file: PathBuf,

    pub viewport_width: u32,
    pub viewport_height: u32,

    pub load_signal: LoadSignal,

    pub navigation_timeout_ms: u64,

    /// Bounded network-idle wait after navigation; skipped when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_idle_timeout_ms: Option<u64>,

    /// Region that must appear before capture; a timeout yields a partial record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_selector: Option<String>,

    pub required_timeout_ms: u64,

    /// Content awaited inside the required region; a timeout is an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_inner_selector: Option<String>,

    pub inner_timeout_ms: u64,

    /// Maximum length of the sanitized URL fragment in capture file names.
    pub filename_max_len: usize,

    pub pacing: PacingConfig,
}

impl SiteConfig {
    fn browsing_site(session_file: &str, urls: &[&str]) -> Self {
        Self {
            enabled: true,
            urls: urls.iter().map(|u| u.to_string()).collect(),
            session_file: PathBuf::from(session_file),
            viewport_width: 1366,
            viewport_height: 768,
            load_signal: LoadSignal::Load,
            navigation_timeout_ms: 30_000,
            network_idle_timeout_ms: None,
            required_selector: None,
            required_timeout_ms: 20_000,
            required_inner_selector: None,
            inner_timeout_ms: 15_000,
            filename_max_len: 120,
            pacing: PacingConfig::browsing(),
        }
    }

    /// Amazon defaults.
    pub fn amazon() -> Self {
        Self::browsing_site(
            "amazon_cookies.json",
            &[
                "https://www.amazon.com/Samsung-Smartphone-Unlocked-Manufacturer-Warranty/dp/B0F7JRKGH1",
                "https://www.amazon.com/Smartphone-Unlocked-Processor-Manufacturer-Warranty/dp/B0DP3G4GVQ",
                "https://www.amazon.com/Samsung-Smartphone-Unlocked-Manufacturer-Warranty/dp/B0F7K3FZ79",
                "https://www.amazon.com/SAMSUNG-Smartphone-Processor-ProScaler-Manufacturer/dp/B0DYVMVZSY",
            ],
        )
    }

    /// BestBuy defaults.
    pub fn bestbuy() -> Self {
        Self::browsing_site(
            "bestbuy_cookies.json",
            &[
                "https://www.bestbuy.com/product/samsung-galaxy-z-fold7-512gb-unlocked-blue-shadow/JJGRF3XK3P",
                "https://www.bestbuy.com/product/samsung-galaxy-s25-ultra-512gb-unlocked-titanium-black/J3ZYG25H6J",
                "https://www.bestbuy.com/product/samsung-galaxy-z-flip7-512gb-unlocked-jet-black/JJGRF335X6",
                "https://www.bestbuy.com/product/samsung-galaxy-s25-edge-512gb-unlocked-titanium-jet-black/JJGRF3CQKC",
            ],
        )
    }

    /// Samsung defaults: DOM-ready navigation, network idle, and a required
    /// `#device_info` region.
    pub fn samsung() -> Self {
        Self {
            session_file: PathBuf::from("samsung_cookies.json"),
            urls: [
                "https://www.samsung.com/us/smartphones/galaxy-z-fold7/buy/galaxy-z-fold7-512gb-unlocked-sku-sm-f966udbexaa/",
                "https://www.samsung.com/us/smartphones/galaxy-s25-ultra/buy/galaxy-s25-ultra-512gb-unlocked-sku-sm-s938uzkexaa/",
                "https://www.samsung.com/us/smartphones/galaxy-z-flip7/buy/galaxy-z-flip7-512gb-unlocked-sku-sm-f766uzkexaa/",
                "https://www.samsung.com/us/smartphones/galaxy-s25-ultra/buy/galaxy-s25-edge-512gb-unlocked-sku-sm-s937uzkexaa/",
            ]
            .iter()
            .map(|u| u.to_string())
            .collect(),
            viewport_width: 1600,
            viewport_height: 900,
            load_signal: LoadSignal::DomContentLoaded,
            network_idle_timeout_ms: Some(20_000),
            required_selector: Some("#device_info".to_string()),
            required_inner_selector: Some("#device_info span".to_string()),
            filename_max_len: 200,
            pacing: PacingConfig::minimal(),
            ..Self::browsing_site("samsung_cookies.json", &[])
        }
    }
}

/// The three site pipelines.
#[derive(Debug, Clone, Serialize)]
pub struct SitesConfig {
    pub amazon: SiteConfig,
    pub bestbuy: SiteConfig,
    pub samsung: SiteConfig,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            amazon: SiteConfig::amazon(),
            bestbuy: SiteConfig::bestbuy(),
            samsung: SiteConfig::samsung(),
        }
    }
}

impl<'de> Deserialize<'de> for SitesConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawSites {
            amazon: Option<toml::Table>,
            bestbuy: Option<toml::Table>,
            samsung: Option<toml::Table>,
        }

        let raw = RawSites::deserialize(deserializer)?;
        Ok(Self {
            amazon: overlay(SiteConfig::amazon(), raw.amazon).map_err(de::Error::custom)?,
            bestbuy: overlay(SiteConfig::bestbuy(), raw.bestbuy).map_err(de::Error::custom)?,
            samsung: overlay(SiteConfig::samsung(), raw.samsung).map_err(de::Error::custom)?,
        })
    }
}

/// Overlay a partial site table onto a site's defaults.
fn overlay(base: SiteConfig, patch: Option<toml::Table>) -> Result<SiteConfig, String> {
    let Some(patch) = patch else {
        return Ok(base);
    };

    let toml::Value::Table(mut merged) = toml::Value::try_from(&base).map_err(|e| e.to_string())?
    else {
        return Err("site defaults did not serialize to a table".to_string());
    };
    merge_tables(&mut merged, patch);
    toml::Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| e.to_string())
}

fn merge_tables(base: &mut toml::Table, patch: toml::Table) {
    for (key, value) in patch {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
