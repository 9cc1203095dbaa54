//! Attribute catalog: which numeric queue attributes are exported.
//!
//! The table is fixed for the lifetime of the process. Its order is the order
//! in which families are described and samples are emitted for each queue.

use crate::metric::{fq_name, MetricDesc, MetricKind};

pub const NAMESPACE: &str = "aws";
pub const SUBSYSTEM: &str = "sqs";

/// Label carrying the queue name on every per-queue sample.
pub const NAME_LABEL: &str = "name";

/// Prefix applied to tag keys projected as labels.
pub const TAG_LABEL_PREFIX: &str = "tag_";

/// One exported `(metric, upstream attribute)` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub exported_name: &'static str,
    pub help: &'static str,
    pub upstream_key: &'static str,
    /// Semantic kind of the attribute. Queue attributes are point-in-time
    /// readings, so every entry is currently a gauge.
    pub kind: MetricKind,
}

impl CatalogEntry {
    /// Fully qualified family name, e.g. `aws_sqs_approximate_number_of_messages`.
    pub fn fq_name(&self) -> String {
        fq_name(NAMESPACE, SUBSYSTEM, self.exported_name)
    }

    pub fn desc(&self) -> MetricDesc {
        MetricDesc::new(self.fq_name(), self.help, self.kind).with_labels(&[NAME_LABEL])
    }
}

const CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        exported_name: "approximate_number_of_messages",
        help: "The approximate number of messages available for retrieval from the queue.",
        upstream_key: "ApproximateNumberOfMessages",
        kind: MetricKind::Gauge,
    },
    CatalogEntry {
        exported_name: "approximate_number_of_messages_delayed",
        help: "The approximate number of messages in the queue that are delayed and not available for reading immediately.",
        upstream_key: "ApproximateNumberOfMessagesDelayed",
        kind: MetricKind::Gauge,
    },
    CatalogEntry {
        exported_name: "approximate_number_of_messages_not_visible",
        help: "The approximate number of messages that are in flight.",
        upstream_key: "ApproximateNumberOfMessagesNotVisible",
        kind: MetricKind::Gauge,
    },
];

/// All catalog entries in stable order.
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Upstream attribute keys to request in one batched fetch.
pub fn upstream_keys() -> Vec<&'static str> {
    CATALOG.iter().map(|e| e.upstream_key).collect()
}
