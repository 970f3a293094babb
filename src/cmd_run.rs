//! `run` command: pipelines, summary, append and projection.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use pricetrack_browser::{CdpLauncher, LaunchConfig};
use pricetrack_config::{Config, ConfigValidator};
use pricetrack_core::{RunReport, Runner, SiteReport};
use pricetrack_extract::Site;

/// Handle the run command.
pub(crate) async fn handle_run(
    config: Config,
    only: &[Site],
    headed: bool,
    no_project: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(&config)?;
    for warning in &validation.warnings {
        warn!("config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for error in &validation.errors {
            eprintln!("  ✗ {}: {}", error.path, error.message);
        }
        return Err("configuration is invalid; run `pricetrack config check`".into());
    }

    info!("Starting pricetrack v{}", env!("CARGO_PKG_VERSION"));
    let headless = config.browser.headless && !headed;

    let launcher = CdpLauncher::new(LaunchConfig {
        debug_port: config.browser.debug_port,
        headless,
        chrome_path: config.browser.chrome_path.clone(),
        profile_dir: config.browser.profile_dir.clone(),
        launch_timeout: Duration::from_millis(config.browser.launch_timeout_ms),
    });
    let runner = Runner::new(config, Arc::new(launcher));

    let sites = runner.selected_sites(only);
    if sites.is_empty() {
        println!("No enabled sites selected.");
        return Ok(());
    }

    let report = runner.run(&sites, headless).await;
    print_summary(&report);

    let outcome = runner.persist(&report, !no_project)?;
    println!();
    if outcome.append.created {
        println!("Results written to new table: {}", outcome.table.display());
    } else {
        println!(
            "Results appended to {} (row {}, {} new columns)",
            outcome.table.display(),
            outcome.append.row,
            outcome.append.new_columns.len()
        );
    }
    if let Some(projection) = outcome.projection {
        println!(
            "Projected view '{}' rebuilt ({} columns, {} rows)",
            projection.sheet, projection.columns, projection.rows
        );
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    for site in &report.sites {
        print_site(site);
    }

    let (ok, partial, error) = report.counts();
    println!();
    println!(
        "Overall: {} ok, {} partial, {} error ({} pipelines)",
        ok,
        partial,
        error,
        report.sites.len()
    );
}

fn print_site(report: &SiteReport) {
    println!();
    println!("--- {} ---", report.site.display_name());

    if let Some(failure) = &report.failure {
        println!("  ✗ pipeline failed: {}", failure);
        return;
    }

    println!(
        "{:<4} {:<28} {:<14} {}",
        "#",
        "STATUS",
        "PRICE",
        report.site.identifier_field().to_uppercase()
    );
    println!("{}", "-".repeat(70));
    for (idx, result) in report.results.iter().enumerate() {
        let marker = match &result.status {
            pricetrack_core::Status::Ok => "✓",
            pricetrack_core::Status::Partial(_) => "⚠",
            pricetrack_core::Status::Error(_) => "✗",
        };
        let status = truncate(&result.status.to_string(), 26);
        println!(
            "{:<4} {} {:<26} {:<14} {}",
            idx + 1,
            marker,
            status,
            result.price.as_deref().unwrap_or("-"),
            result.identifier.as_deref().unwrap_or("-")
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}
