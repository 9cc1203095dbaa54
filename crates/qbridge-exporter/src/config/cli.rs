//! Command-line flags. Every flag is optional so only explicit values
//! override the config file.

use std::path::PathBuf;

use clap::Parser;

use super::schema::ExporterConfig;

#[derive(Debug, Default, Parser)]
#[command(name = "qbridge")]
#[command(about = "Exports AWS SQS queue attributes as Prometheus metrics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Listen address for prometheus [default: 0.0.0.0:9108]
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Path under which to expose metrics [default: /metrics]
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Queue update interval, seconds [default: 600]
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Add tags as labels to metrics; bare `--tags` means true [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub tags: Option<bool>,

    /// Queue prefix to fetch, applied before the filter
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Regex to filter the queue list after fetching [default: .*]
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Attribute fetches in flight per scrape [default: 4]
    #[arg(long, value_name = "N")]
    pub scrape_concurrency: Option<usize>,

    /// AWS region (defaults to the SDK provider chain)
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Endpoint override for SQS-compatible services
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,
}

impl Cli {
    /// Overlay explicitly given flags onto `cfg`.
    pub fn apply(&self, cfg: &mut ExporterConfig) {
        if let Some(v) = &self.listen {
            cfg.listen = v.clone();
        }
        if let Some(v) = &self.path {
            cfg.metrics_path = v.clone();
        }
        if let Some(v) = self.interval {
            cfg.interval_secs = v;
        }
        if let Some(v) = self.tags {
            cfg.tags_as_labels = v;
        }
        if let Some(v) = &self.prefix {
            cfg.prefix = v.clone();
        }
        if let Some(v) = &self.filter {
            cfg.filter = v.clone();
        }
        if let Some(v) = self.scrape_concurrency {
            cfg.scrape_concurrency = v;
        }
        if let Some(v) = &self.region {
            cfg.upstream.region = Some(v.clone());
        }
        if let Some(v) = &self.endpoint_url {
            cfg.upstream.endpoint_url = Some(v.clone());
        }
    }
}
