use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_validate_table_extension() {
    let mut config = Config::default();
    config.output.table = "outputs/results.csv".into();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "output.table"));
}

#[test]
fn test_validate_inverted_pacing_range() {
    let mut config = Config::default();
    config.sites.amazon.pacing.settle_min_ms = 9000;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result
        .errors
        .iter()
        .any(|e| e.path == "sites.amazon.pacing.settle"));
}

#[test]
fn test_validate_zero_viewport() {
    let mut config = Config::default();
    config.sites.samsung.viewport_width = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "sites.samsung.viewport"));
}

#[test]
fn test_validate_bad_url() {
    let mut config = Config::default();
    config.sites.bestbuy.urls = vec!["www.bestbuy.com/product/x".to_string()];

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "sites.bestbuy.urls"));
}

#[test]
fn test_validate_enabled_site_without_urls_warns() {
    let mut config = Config::default();
    config.sites.samsung.urls.clear();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "sites.samsung.urls"));
}

#[test]
fn test_validate_disabled_site_without_urls_is_silent() {
    let mut config = Config::default();
    config.sites.samsung.urls.clear();
    config.sites.samsung.enabled = false;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_projection_sheet_name() {
    let mut config = Config::default();
    config.projection.sheet_name = "  ".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "projection.sheet_name"));
}

#[test]
fn test_validate_malformed_column_token_warns() {
    let mut config = Config::default();
    config.projection.columns.push("a1".to_string());

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.message.contains("a1")));
}

#[test]
fn test_validation_result_default() {
    let result = ValidationResult::default();
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}
