//! Per-scrape queue attribute collector.
//!
//! Every scrape reads the current inventory snapshot, fetches fresh attribute
//! values for each queue, and emits one gauge per catalog entry per queue plus
//! the scrape counter. A queue whose fetch fails is skipped for that scrape.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

use qbridge_core::catalog::{self, NAMESPACE, SUBSYSTEM};
use qbridge_core::metric::{fq_name, MetricDesc, MetricKind, Sample};
use qbridge_core::queue::QueueRecord;

use super::registry::Collector;
use crate::inventory::SnapshotCell;
use crate::upstream::QueueApi;

pub struct QueueCollector {
    api: Arc<dyn QueueApi>,
    inventory: Arc<SnapshotCell>,
    concurrency: usize,
    total_scrapes: AtomicU64,
    scrapes_desc: MetricDesc,
}

impl QueueCollector {
    pub fn new(api: Arc<dyn QueueApi>, inventory: Arc<SnapshotCell>, concurrency: usize) -> Self {
        Self {
            api,
            inventory,
            concurrency: concurrency.max(1),
            total_scrapes: AtomicU64::new(0),
            scrapes_desc: MetricDesc::new(
                fq_name(NAMESPACE, SUBSYSTEM, "total_scrapes"),
                "Current total AWS SQS scrapes.",
                MetricKind::Counter,
            ),
        }
    }

    /// Scrapes started so far.
    pub fn total_scrapes(&self) -> u64 {
        self.total_scrapes.load(Ordering::Relaxed)
    }

    async fn collect_queue(&self, queue: &QueueRecord, keys: &[&str]) -> Vec<Sample> {
        let labels = queue.label_set();

        let attrs = match self.api.queue_attributes(&queue.locator, keys).await {
            Ok(attrs) => attrs,
            Err(e) => {
                tracing::warn!(queue = %queue.name, error = %e, "failed to get queue attributes");
                return Vec::new();
            }
        };

        catalog::entries()
            .iter()
            .map(|entry| Sample::new(entry.fq_name(), labels.clone(), attrs.value(entry.upstream_key)))
            .collect()
    }
}

#[async_trait]
impl Collector for QueueCollector {
    fn describe(&self) -> Vec<MetricDesc> {
        let mut descs: Vec<MetricDesc> = catalog::entries().iter().map(|e| e.desc()).collect();
        descs.push(self.scrapes_desc.clone());
        descs
    }

    async fn collect(&self) -> Vec<Sample> {
        let scrape = self.total_scrapes.fetch_add(1, Ordering::Relaxed) + 1;

        let snapshot = self.inventory.load();
        tracing::debug!(queues = snapshot.len(), scrape, "collecting queue metrics");

        let keys = catalog::upstream_keys();
        let per_queue: Vec<Vec<Sample>> = stream::iter(snapshot.queues().to_vec())
            .map(|queue| {
                let keys = &keys;
                async move { self.collect_queue(&queue, keys).await }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut samples: Vec<Sample> = per_queue.into_iter().flatten().collect();
        samples.push(Sample::new(self.scrapes_desc.name.clone(), Vec::new(), scrape as f64));
        samples
    }
}
