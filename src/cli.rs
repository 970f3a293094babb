//! CLI definitions for pricetrack.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricetrack_extract::Site;

/// pricetrack CLI.
#[derive(Parser)]
#[command(name = "pricetrack")]
#[command(about = "Capture product prices and keep a spreadsheet history")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/pricetrack.toml", global = true)]
    pub config: PathBuf,

    /// Output directory for captured pages, the table and logs
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the site pipelines and append the results to the table
    Run {
        /// Only run these sites (amazon, bestbuy, samsung); repeatable
        #[arg(long = "site")]
        sites: Vec<Site>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Skip the column projection after appending
        #[arg(long)]
        no_project: bool,
    },

    /// Rebuild the projected view sheet from the table
    Project {
        /// Table file (defaults to output.table)
        #[arg(long)]
        table: Option<PathBuf>,

        /// Target sheet name (defaults to projection.sheet_name)
        #[arg(long)]
        sheet: Option<String>,

        /// Source sheet name (defaults to the first sheet)
        #[arg(long)]
        source_sheet: Option<String>,

        /// Comma-separated column layout, e.g. "a,d,blank column,ar"
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },

    /// Run one site's extractor against a saved page
    Extract {
        /// Site whose rules to apply
        site: Site,

        /// Captured HTML file
        file: PathBuf,

        /// URL the page was captured from (used for the Samsung SKU)
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Validate the configuration file
    Check,

    /// Print the effective configuration as TOML
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_sites() {
        let cli = Cli::parse_from(["pricetrack", "run", "--site", "amazon", "--site", "samsung", "--headed"]);
        match cli.command {
            Commands::Run { sites, headed, no_project } => {
                assert_eq!(sites, vec![Site::Amazon, Site::Samsung]);
                assert!(headed);
                assert!(!no_project);
            }
            _ => panic!("expected run"),
        }
        assert_eq!(cli.config, PathBuf::from("config/pricetrack.toml"));
    }

    #[test]
    fn test_parse_project_columns() {
        let cli = Cli::parse_from(["pricetrack", "project", "--columns", "a,blank column,ar"]);
        match cli.command {
            Commands::Project { columns, .. } => {
                assert_eq!(
                    columns,
                    Some(vec!["a".to_string(), "blank column".to_string(), "ar".to_string()])
                );
            }
            _ => panic!("expected project"),
        }
    }

    #[test]
    fn test_unknown_site_rejected() {
        assert!(Cli::try_parse_from(["pricetrack", "run", "--site", "walmart"]).is_err());
    }
}
