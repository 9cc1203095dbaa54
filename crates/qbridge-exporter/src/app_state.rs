//! Shared application state for the exporter HTTP surface.

use std::sync::Arc;

use qbridge_core::error::Result;

use crate::config::ExporterConfig;
use crate::obs::{Collector, Registry};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Registry,
}

impl AppState {
    /// Build application state, registering `collectors` in order.
    /// Fails if two collectors declare the same family.
    pub fn new(cfg: ExporterConfig, collectors: Vec<Arc<dyn Collector>>) -> Result<Self> {
        let mut registry = Registry::new();
        for c in collectors {
            registry.register(c)?;
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}
