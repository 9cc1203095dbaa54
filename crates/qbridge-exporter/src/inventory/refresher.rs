//! Periodic queue discovery.
//!
//! A discovery either produces a complete snapshot or fails as a whole; the
//! previous snapshot stays visible until a later discovery succeeds.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use qbridge_core::error::Result;
use qbridge_core::queue::QueueRecord;

use super::snapshot::{Snapshot, SnapshotCell};
use crate::config::{ExporterConfig, MAX_INTERVAL_SECS};
use crate::upstream::QueueApi;

/// Which queues make it into a snapshot.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    /// Server-side name prefix. Empty disables it.
    pub prefix: String,
    /// Client-side match on the derived queue name.
    pub regex: Regex,
    /// Fetch tags for every kept queue.
    pub tags_as_labels: bool,
}

impl DiscoveryFilter {
    pub fn from_config(cfg: &ExporterConfig) -> Result<Self> {
        Ok(Self {
            prefix: cfg.prefix.clone(),
            regex: cfg.compile_filter()?,
            tags_as_labels: cfg.tags_as_labels,
        })
    }

    fn list_prefix(&self) -> Option<&str> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(&self.prefix)
        }
    }
}

/// Run one discovery against the upstream API.
pub async fn discover(api: &dyn QueueApi, filter: &DiscoveryFilter) -> Result<Snapshot> {
    let locators = api.list_queues(filter.list_prefix()).await?;

    let mut queues = Vec::with_capacity(locators.len());
    for locator in locators {
        let record = QueueRecord::from_locator(locator)?;
        if !filter.regex.is_match(&record.name) {
            continue;
        }

        let record = if filter.tags_as_labels {
            let tags = api.queue_tags(&record.locator).await?;
            record.with_tags(tags)
        } else {
            record
        };
        queues.push(record);
    }

    Ok(Snapshot::new(queues))
}

/// Keeps a `SnapshotCell` current. Started explicitly by the process.
pub struct InventoryRefresher {
    api: Arc<dyn QueueApi>,
    cell: Arc<SnapshotCell>,
    filter: DiscoveryFilter,
    interval: Duration,
}

impl InventoryRefresher {
    /// `interval` is clamped to between one second and `MAX_INTERVAL_SECS`.
    pub fn new(
        api: Arc<dyn QueueApi>,
        cell: Arc<SnapshotCell>,
        filter: DiscoveryFilter,
        interval: Duration,
    ) -> Self {
        let max = Duration::from_secs(MAX_INTERVAL_SECS);
        if interval > max {
            tracing::warn!(?interval, ?max, "refresh interval clamped");
        }
        Self {
            api,
            cell,
            filter,
            interval: interval.clamp(Duration::from_secs(1), max),
        }
    }

    /// Discover and publish once. Returns the number of published queues.
    pub async fn refresh(&self) -> Result<usize> {
        let snapshot = discover(self.api.as_ref(), &self.filter).await?;
        let count = snapshot.len();
        self.cell.publish(snapshot);
        tracing::info!(count, "queue inventory refreshed");
        Ok(count)
    }

    /// First discovery. There is nothing to serve without it, so callers
    /// should treat an error as fatal.
    pub async fn prime(&self) -> Result<usize> {
        tracing::info!(
            prefix = %self.filter.prefix,
            filter = %self.filter.regex,
            tags_as_labels = self.filter.tags_as_labels,
            "starting queue inventory"
        );
        self.refresh().await
    }

    /// Refresh every `interval` until `shutdown` turns true or its sender is
    /// dropped. Failures keep the last published snapshot.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut tick = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tick.tick() => {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(
                            kind = e.kind().as_str(),
                            error = %e,
                            "queue inventory refresh failed; serving previous snapshot"
                        );
                    }
                }
            }
        }

        tracing::info!("queue inventory refresher stopped");
    }
}
