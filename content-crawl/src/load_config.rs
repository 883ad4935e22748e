//! Loads a crawler config YAML file and applies environment overrides.
//!
//! Parsing and structural validation belong to
//! [`CrawlerConfig`](content_crawl_core::crawler::CrawlerConfig); this module
//! handles the file, the environment and error context for the CLI.
//!
//! # Environment
//! - `CONTENT_CRAWL_PROVIDER` replaces the config-wide default provider.
//! - `CONTENT_CRAWL_SITES` is a comma-separated list of site ids; every target
//!   is restricted to those sites.
use anyhow::{anyhow, Result};
use content_crawl_core::crawler::CrawlerConfig;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub const PROVIDER_ENV: &str = "CONTENT_CRAWL_PROVIDER";
pub const SITES_ENV: &str = "CONTENT_CRAWL_SITES";

/// Reads, parses and validates a crawler config, then applies env overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CrawlerConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading crawler config from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let mut config: CrawlerConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if let Err(e) = config.validate() {
        error!(error = %e, config_path = ?path_ref, "Config failed validation");
        return Err(anyhow!("Config {:?} is invalid: {e}", path_ref));
    }

    apply_env_overrides(&mut config)?;
    config.trace_loaded();
    Ok(config)
}

fn apply_env_overrides(config: &mut CrawlerConfig) -> Result<()> {
    if let Ok(provider) = env::var(PROVIDER_ENV) {
        let provider = provider.trim();
        if !provider.is_empty() {
            info!(provider, "Overriding default provider from environment");
            config.provider = Some(provider.to_string());
        }
    }

    if let Ok(sites) = env::var(SITES_ENV) {
        let sites = parse_sites(&sites)?;
        if sites.is_empty() {
            warn!("{SITES_ENV} is set but lists no sites, ignoring");
        } else {
            info!(?sites, "Restricting targets to sites from environment");
            config.restrict_sites(&sites);
        }
    }
    Ok(())
}

fn parse_sites(value: &str) -> Result<Vec<i64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow!("{SITES_ENV} has a non-numeric site id '{s}'"))
        })
        .collect()
}
