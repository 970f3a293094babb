use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.output.dir, PathBuf::from("outputs"));
    assert_eq!(config.output.table, PathBuf::from("outputs").join("results.xlsx"));
    assert!(config.browser.headless);
    assert_eq!(config.browser.debug_port, 9222);
    assert!(config.projection.enabled);
}

#[test]
fn test_log_dir_defaults_under_output() {
    let output = OutputConfig::default();
    assert_eq!(output.log_dir(), PathBuf::from("outputs").join("logs"));
}

#[test]
fn test_amazon_and_bestbuy_share_browsing_defaults() {
    let sites = SitesConfig::default();
    for site in [&sites.amazon, &sites.bestbuy] {
        assert_eq!(site.load_signal, LoadSignal::Load);
        assert_eq!((site.viewport_width, site.viewport_height), (1366, 768));
        assert_eq!(site.filename_max_len, 120);
        assert!(site.network_idle_timeout_ms.is_none());
        assert!(site.required_selector.is_none());
        assert_eq!(site.pacing, PacingConfig::browsing());
        assert_eq!(site.urls.len(), 4);
    }
    assert_eq!(sites.amazon.session_file, PathBuf::from("amazon_cookies.json"));
    assert_eq!(sites.bestbuy.session_file, PathBuf::from("bestbuy_cookies.json"));
}

#[test]
fn test_samsung_defaults() {
    let samsung = SiteConfig::samsung();
    assert_eq!(samsung.load_signal, LoadSignal::DomContentLoaded);
    assert_eq!(samsung.network_idle_timeout_ms, Some(20_000));
    assert_eq!(samsung.required_selector.as_deref(), Some("#device_info"));
    assert_eq!(samsung.required_inner_selector.as_deref(), Some("#device_info span"));
    assert_eq!(samsung.required_timeout_ms, 20_000);
    assert_eq!(samsung.inner_timeout_ms, 15_000);
    assert_eq!(samsung.filename_max_len, 200);
    assert_eq!(samsung.pacing.mouse_moves, 0);
    assert_eq!(samsung.pacing.scrolls, 0);
    assert_eq!(samsung.session_file, PathBuf::from("samsung_cookies.json"));
    assert!(samsung.urls.iter().all(|u| u.contains("-sku-")));
}

#[test]
fn test_pacing_none_has_no_delays() {
    let pacing = PacingConfig::none();
    assert_eq!(pacing.settle_max_ms, 0);
    assert_eq!(pacing.move_pause_max_ms, 0);
    assert_eq!(pacing.scroll_pause_max_ms, 0);
    assert_eq!(pacing.mouse_moves + pacing.scrolls, 0);
}

#[test]
fn test_default_projection_layout() {
    let projection = ProjectionConfig::default();
    assert_eq!(projection.sheet_name, "converted");
    assert_eq!(projection.columns.len(), 28);
    assert_eq!(projection.columns[0], "a");
    assert_eq!(
        projection.columns.iter().filter(|c| *c == BLANK_COLUMN).count(),
        3
    );
}

#[test]
fn test_load_signal_names() {
    let json = serde_json::to_string(&LoadSignal::DomContentLoaded).unwrap();
    assert_eq!(json, "\"domcontentloaded\"");
    let signal: LoadSignal = serde_json::from_str("\"load\"").unwrap();
    assert_eq!(signal, LoadSignal::Load);
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("results.xlsx"));
    assert!(json.contains("#device_info"));
}

#[test]
fn test_nested_pacing_override_is_merged() {
    let config: Config = toml::from_str(
        r#"
        [sites.bestbuy]
        enabled = false

        [sites.bestbuy.pacing]
        scrolls = 5
        "#,
    )
    .unwrap();
    assert!(!config.sites.bestbuy.enabled);
    assert_eq!(config.sites.bestbuy.pacing.scrolls, 5);
    assert_eq!(config.sites.bestbuy.pacing.mouse_moves, 3);
    assert!(config.sites.amazon.enabled);
}
