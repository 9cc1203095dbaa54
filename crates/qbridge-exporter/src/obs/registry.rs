use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use qbridge_core::error::{QBridgeError, Result};
use qbridge_core::exposition;
use qbridge_core::metric::{MetricDesc, Sample};

/// Source of metric families, invoked on every scrape.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Static descriptors of every family this collector may emit.
    fn describe(&self) -> Vec<MetricDesc>;

    /// Current samples. Must not fail; problems are logged and skipped.
    async fn collect(&self) -> Vec<Sample>;
}

/// Ordered set of collectors rendered together.
#[derive(Default)]
pub struct Registry {
    collectors: Vec<Arc<dyn Collector>>,
    names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collector. Family names must be unique across the registry.
    pub fn register(&mut self, collector: Arc<dyn Collector>) -> Result<()> {
        let descs = collector.describe();
        for d in &descs {
            if self.names.contains(&d.name) {
                return Err(QBridgeError::Internal(format!(
                    "metric family registered twice: {}",
                    d.name
                )));
            }
        }
        self.names.extend(descs.into_iter().map(|d| d.name));
        self.collectors.push(collector);
        Ok(())
    }

    /// Collect from every collector and render the text exposition payload.
    pub async fn gather(&self) -> String {
        let mut out = String::new();
        for c in &self.collectors {
            let descs = c.describe();
            let samples = c.collect().await;
            out.push_str(&exposition::render(&descs, &samples));
        }
        out
    }
}
