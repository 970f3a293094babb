//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{BLANK_COLUMN, Config, PacingConfig, SiteConfig};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_output(config, &mut result);
        Self::validate_browser(config, &mut result);

        for (name, site) in [
            ("amazon", &config.sites.amazon),
            ("bestbuy", &config.sites.bestbuy),
            ("samsung", &config.sites.samsung),
        ] {
            Self::validate_site(name, site, &mut result);
        }

        Self::validate_projection(config, &mut result);

        Ok(result)
    }

    fn validate_output(config: &Config, result: &mut ValidationResult) {
        if config.output.dir.as_os_str().is_empty() {
            result.add_error(ValidationError::new(
                "output.dir",
                "Output directory cannot be empty",
            ));
        }

        match config.output.table.extension().and_then(|e| e.to_str()) {
            Some("xlsx") => {}
            _ => result.add_error(ValidationError::new(
                "output.table",
                "Results table must be an .xlsx file",
            )),
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.launch_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_ms",
                "launch_timeout_ms must be greater than 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_site(name: &str, site: &SiteConfig, result: &mut ValidationResult) {
        let prefix = format!("sites.{}", name);

        if site.enabled && site.urls.is_empty() {
            result.add_warning(ValidationWarning::new(
                format!("{}.urls", prefix),
                "Site is enabled but has no URLs",
            ));
        }

        for url in &site.urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    format!("{}.urls", prefix),
                    format!("URL must start with http:// or https://: {}", url),
                ));
            }
        }

        if site.viewport_width == 0 || site.viewport_height == 0 {
            result.add_error(ValidationError::new(
                format!("{}.viewport", prefix),
                "Viewport dimensions must be greater than 0",
            ));
        }

        if site.navigation_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                format!("{}.navigation_timeout_ms", prefix),
                "navigation_timeout_ms must be greater than 0",
            ));
        }

        if site.filename_max_len == 0 {
            result.add_error(ValidationError::new(
                format!("{}.filename_max_len", prefix),
                "filename_max_len must be greater than 0",
            ));
        }

        if site.required_inner_selector.is_some() && site.required_selector.is_none() {
            result.add_warning(ValidationWarning::new(
                format!("{}.required_inner_selector", prefix),
                "Inner selector is ignored without required_selector",
            ));
        }

        Self::validate_pacing(&format!("{}.pacing", prefix), &site.pacing, result);
    }

    fn validate_pacing(prefix: &str, pacing: &PacingConfig, result: &mut ValidationResult) {
        let ranges = [
            ("settle", pacing.settle_min_ms, pacing.settle_max_ms),
            ("mouse_x", pacing.mouse_x_min as u64, pacing.mouse_x_max as u64),
            ("mouse_y", pacing.mouse_y_min as u64, pacing.mouse_y_max as u64),
            ("move_steps", pacing.move_steps_min as u64, pacing.move_steps_max as u64),
            ("move_pause", pacing.move_pause_min_ms, pacing.move_pause_max_ms),
            ("scroll", pacing.scroll_min_px as u64, pacing.scroll_max_px as u64),
            ("scroll_pause", pacing.scroll_pause_min_ms, pacing.scroll_pause_max_ms),
        ];

        for (name, min, max) in ranges {
            if min > max {
                result.add_error(ValidationError::new(
                    format!("{}.{}", prefix, name),
                    format!("Range minimum {} exceeds maximum {}", min, max),
                ));
            }
        }

        if pacing.mouse_moves > 0 && pacing.move_steps_min == 0 {
            result.add_error(ValidationError::new(
                format!("{}.move_steps_min", prefix),
                "move_steps_min must be greater than 0",
            ));
        }
    }

    fn validate_projection(config: &Config, result: &mut ValidationResult) {
        let projection = &config.projection;

        if projection.sheet_name.trim().is_empty() {
            result.add_error(ValidationError::new(
                "projection.sheet_name",
                "Sheet name cannot be empty",
            ));
        }

        if projection.source_sheet.as_deref() == Some(projection.sheet_name.as_str()) {
            result.add_error(ValidationError::new(
                "projection.source_sheet",
                "Source sheet cannot be the projection target",
            ));
        }

        if projection.enabled && projection.columns.is_empty() {
            result.add_warning(ValidationWarning::new(
                "projection.columns",
                "Projection is enabled but the column layout is empty",
            ));
        }

        for token in &projection.columns {
            let token = token.trim();
            let blank = token.eq_ignore_ascii_case(BLANK_COLUMN);
            if !blank && (token.is_empty() || !token.chars().all(|c| c.is_ascii_alphabetic())) {
                result.add_warning(ValidationWarning::new(
                    "projection.columns",
                    format!("'{}' is not a column reference, an empty column will be written", token),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
