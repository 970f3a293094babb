//! Configuration subcommand handlers.

use std::path::Path;

use pricetrack_config::{Config, ConfigValidator};

use crate::cli::ConfigAction;

pub(crate) fn handle_config_command(
    action: ConfigAction,
    path: &Path,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Check => config_check(path, config),
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}

fn config_check(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        println!("Configuration: {}", path.display());
    } else {
        println!("Configuration: {} (not found, using defaults)", path.display());
    }

    let result = ConfigValidator::validate(config)?;

    for error in &result.errors {
        println!("  ✗ {}: {}", error.path, error.message);
    }
    for warning in &result.warnings {
        println!("  ⚠ {}: {}", warning.path, warning.message);
    }

    if result.is_valid() {
        println!(
            "✓ Configuration is valid ({} warnings)",
            result.warnings.len()
        );
        Ok(())
    } else {
        Err(format!("{} configuration errors", result.errors.len()).into())
    }
}
