//! Upstream queue service seam.
//!
//! The collector and refresher only talk to the queue service through
//! `QueueApi`; `SqsApi` is the production implementation.

pub mod sqs;

use std::collections::BTreeMap;

use async_trait::async_trait;

use qbridge_core::error::Result;
use qbridge_core::queue::QueueAttributes;

pub use sqs::SqsApi;

/// Control-plane calls the bridge needs from the queue service.
#[async_trait]
pub trait QueueApi: Send + Sync {
    /// Locators of all queues whose name starts with `prefix`, in upstream order.
    async fn list_queues(&self, prefix: Option<&str>) -> Result<Vec<String>>;

    /// Tags attached to one queue.
    async fn queue_tags(&self, locator: &str) -> Result<BTreeMap<String, String>>;

    /// Current values of the requested attributes of one queue.
    async fn queue_attributes(&self, locator: &str, keys: &[&str]) -> Result<QueueAttributes>;
}
