//! pricetrack - browser-driven product price capture
//!
//! Main entry point for the pricetrack CLI.

mod cli;
mod cmd_config;
mod cmd_extract;
mod cmd_project;
mod cmd_run;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pricetrack_config::{Config, ConfigLoader};

use crate::cli::{Cli, Commands};

fn init_tracing(log_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pricetrack")
        .filename_suffix("log")
        .max_log_files(30)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive until exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load the config file (defaults when absent) and apply CLI overrides.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(&cli.config)?;

    config.output.dir = expand(&config.output.dir);
    config.output.table = expand(&config.output.table);
    config.browser.chrome_path = config.browser.chrome_path.as_deref().map(expand);
    config.browser.profile_dir = config.browser.profile_dir.as_deref().map(expand);

    if let Some(dir) = &cli.output_dir {
        let table_name = config
            .output
            .table
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("results.xlsx"));
        config.output.table = dir.join(table_name);
        config.output.dir = dir.clone();
    }

    Ok(config)
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.output.log_dir())?;

    match cli.command {
        Commands::Run {
            sites,
            headed,
            no_project,
        } => cmd_run::handle_run(config, &sites, headed, no_project).await,
        Commands::Project {
            table,
            sheet,
            source_sheet,
            columns,
        } => cmd_project::handle_project(config, table, sheet, source_sheet, columns),
        Commands::Extract { site, file, url } => cmd_extract::handle_extract(site, &file, &url),
        Commands::Config { action } => cmd_config::handle_config_command(action, &cli.config, &config),
    }
}
