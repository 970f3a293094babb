//! Run orchestration: pipelines in site order, then persistence.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pricetrack_browser::BrowserLauncher;
use pricetrack_config::{Config, SiteConfig, SitesConfig};
use pricetrack_extract::Site;
use pricetrack_store::{AppendOutcome, AppendStore, ColumnProjector, FlatRecord, Projection, StoreError};
use tracing::{error, info};

use crate::flatten::flatten;
use crate::pacing::Pacer;
use crate::pipeline::{PipelineSettings, SitePipeline};
use crate::record::{Status, UrlResult};

/// A site's configuration within the run config.
pub fn site_config(sites: &SitesConfig, site: Site) -> &SiteConfig {
    match site {
        Site::Amazon => &sites.amazon,
        Site::BestBuy => &sites.bestbuy,
        Site::Samsung => &sites.samsung,
    }
}

/// Results of one site within a run.
#[derive(Debug, Clone)]
pub struct SiteReport {
    pub site: Site,
    pub results: Vec<UrlResult>,
    /// Pipeline-level failure; `results` is empty when set.
    pub failure: Option<String>,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub sites: Vec<SiteReport>,
}

impl RunReport {
    pub fn to_record(&self) -> FlatRecord {
        let sites: Vec<(Site, &[UrlResult])> = self
            .sites
            .iter()
            .map(|report| (report.site, report.results.as_slice()))
            .collect();
        flatten(&sites, self.timestamp)
    }

    /// `(ok, partial, error)` record counts across all sites.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.sites
            .iter()
            .flat_map(|report| &report.results)
            .fold((0, 0, 0), |(ok, partial, err), result| match result.status {
                Status::Ok => (ok + 1, partial, err),
                Status::Partial(_) => (ok, partial + 1, err),
                Status::Error(_) => (ok, partial, err + 1),
            })
    }
}

/// What persisting a run wrote.
#[derive(Debug, Clone)]
pub struct PersistOutcome {
    pub table: PathBuf,
    pub append: AppendOutcome,
    pub projection: Option<Projection>,
}

/// Drives the site pipelines for one run.
pub struct Runner {
    config: Config,
    launcher: Arc<dyn BrowserLauncher>,
    pacer: Arc<Pacer>,
}

impl Runner {
    pub fn new(config: Config, launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self::with_pacer(config, launcher, Arc::new(Pacer::new()))
    }

    pub fn with_pacer(config: Config, launcher: Arc<dyn BrowserLauncher>, pacer: Arc<Pacer>) -> Self {
        Self {
            config,
            launcher,
            pacer,
        }
    }

    /// Enabled sites in run order, limited to `only` when non-empty.
    pub fn selected_sites(&self, only: &[Site]) -> Vec<Site> {
        Site::ALL
            .into_iter()
            .filter(|site| site_config(&self.config.sites, *site).enabled)
            .filter(|site| only.is_empty() || only.contains(site))
            .collect()
    }

    /// Run the pipelines for `sites` one after another.
    ///
    /// A pipeline that cannot start is reported and the next site still runs.
    pub async fn run(&self, sites: &[Site], headless: bool) -> RunReport {
        let mut reports = Vec::with_capacity(sites.len());

        for &site in sites {
            let site_cfg = site_config(&self.config.sites, site).clone();
            let settings = PipelineSettings {
                output_dir: self.config.output.dir.clone(),
                session_file: site_cfg.session_file.clone(),
                headless,
                user_agent: Some(self.config.browser.user_agent.clone()),
            };
            let urls = site_cfg.urls.clone();
            let pipeline = SitePipeline::new(site, site_cfg, self.pacer.clone());

            info!("Starting {} pipeline ({} URLs)", site.display_name(), urls.len());
            let report = match pipeline.run(self.launcher.as_ref(), &urls, &settings).await {
                Ok(results) => SiteReport {
                    site,
                    results,
                    failure: None,
                },
                Err(e) => {
                    error!("{} pipeline failed: {}", site.display_name(), e);
                    SiteReport {
                        site,
                        results: Vec::new(),
                        failure: Some(e.to_string()),
                    }
                }
            };
            reports.push(report);
        }

        RunReport {
            timestamp: Utc::now(),
            sites: reports,
        }
    }

    /// Append the run to the history table, then refresh the projected view.
    pub fn persist(&self, report: &RunReport, project: bool) -> Result<PersistOutcome, StoreError> {
        let table = self.config.output.table.clone();
        let append = AppendStore::new(&table).append(&report.to_record())?;

        let projection = if project && self.config.projection.enabled {
            let projection = ColumnProjector::new(self.config.projection.sheet_name.clone())
                .with_source_sheet(self.config.projection.source_sheet.clone())
                .project(&table, &self.config.projection.columns)?;
            Some(projection)
        } else {
            None
        };

        Ok(PersistOutcome {
            table,
            append,
            projection,
        })
    }
}
