use std::net::SocketAddr;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use qbridge_core::error::{QBridgeError, Result};

/// Longest accepted refresh interval (one year).
pub const MAX_INTERVAL_SECS: u64 = 365 * 24 * 3600;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Queue inventory refresh interval.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_tags_as_labels")]
    pub tags_as_labels: bool,

    /// Server-side queue name prefix. Empty means no prefix filter.
    #[serde(default)]
    pub prefix: String,

    /// Client-side regex applied to queue names after listing.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Attribute fetches in flight per scrape.
    #[serde(default = "default_scrape_concurrency")]
    pub scrape_concurrency: usize,

    #[serde(default)]
    pub upstream: UpstreamSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            interval_secs: default_interval_secs(),
            tags_as_labels: default_tags_as_labels(),
            prefix: String::new(),
            filter: default_filter(),
            scrape_concurrency: default_scrape_concurrency(),
            upstream: UpstreamSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_INTERVAL_SECS).contains(&self.interval_secs) {
            return Err(QBridgeError::Config(format!(
                "interval_secs must be between 1 and {MAX_INTERVAL_SECS}"
            )));
        }
        if !self.metrics_path.starts_with('/') || self.metrics_path == "/" {
            return Err(QBridgeError::Config(
                "metrics_path must start with '/' and must not be '/'".into(),
            ));
        }
        // The path is linked from the landing page and used as a literal route.
        if self
            .metrics_path
            .chars()
            .any(|c| matches!(c, '"' | '<' | '>' | '&' | '\'' | ':' | '*') || c.is_whitespace())
        {
            return Err(QBridgeError::Config(
                "metrics_path must not contain quotes, '<', '>', '&', ':', '*' or whitespace".into(),
            ));
        }
        if self.metrics_path == "/healthz" {
            return Err(QBridgeError::Config("metrics_path must not shadow /healthz".into()));
        }
        if !(1..=64).contains(&self.scrape_concurrency) {
            return Err(QBridgeError::Config(
                "scrape_concurrency must be between 1 and 64".into(),
            ));
        }
        self.listen_addr()?;
        self.compile_filter()?;
        self.upstream.validate()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| QBridgeError::Config(format!("listen must be a socket address: {e}")))
    }

    pub fn compile_filter(&self) -> Result<Regex> {
        Regex::new(&self.filter).map_err(|e| QBridgeError::InvalidFilter(e.to_string()))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Upstream client settings. Unset values fall back to the SDK's default chain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint override for SQS-compatible services.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err(QBridgeError::Config("upstream.region must not be empty".into()));
            }
        }
        if let Some(endpoint) = &self.endpoint_url {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(QBridgeError::Config(
                    "upstream.endpoint_url must be an http(s) URL".into(),
                ));
            }
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9108".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_interval_secs() -> u64 {
    600
}
fn default_tags_as_labels() -> bool {
    true
}
fn default_filter() -> String {
    ".*".into()
}
fn default_scrape_concurrency() -> usize {
    4
}
