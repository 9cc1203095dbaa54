//! Queue records and per-scrape attribute values.
//!
//! A `QueueRecord` is created by discovery and never mutated once it is part
//! of a published snapshot. Attribute values are fetched on every scrape and
//! live in a separate `QueueAttributes` that is dropped after rendering.

use std::collections::{BTreeMap, HashMap};

use url::Url;

use crate::catalog::{NAME_LABEL, TAG_LABEL_PREFIX};
use crate::error::{QBridgeError, Result};
use crate::metric::{sanitize_label_name, LabelSet};

/// One discovered queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRecord {
    /// Terminal path segment of the locator.
    pub name: String,
    /// Opaque handle the upstream API addresses the queue by.
    pub locator: String,
    /// Empty unless tags are projected as labels.
    pub tags: BTreeMap<String, String>,
}

impl QueueRecord {
    /// Build a record from its locator, deriving the name.
    pub fn from_locator(locator: impl Into<String>) -> Result<Self> {
        let locator = locator.into();
        let name = derive_name(&locator)?;
        Ok(Self {
            name,
            locator,
            tags: BTreeMap::new(),
        })
    }

    pub fn with_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Labels for this queue: `name` first, then one `tag_<key>` per tag in
    /// key order. Keys that collide after sanitizing keep the first value.
    pub fn label_set(&self) -> LabelSet {
        let mut labels = Vec::with_capacity(1 + self.tags.len());
        labels.push((NAME_LABEL.to_string(), self.name.clone()));

        for (key, value) in &self.tags {
            let label = format!("{TAG_LABEL_PREFIX}{}", sanitize_label_name(key));
            if labels.iter().any(|(k, _)| *k == label) {
                tracing::debug!(queue = %self.name, tag = %key, "tag label collides after sanitizing; skipped");
                continue;
            }
            labels.push((label, value.clone()));
        }
        labels
    }
}

/// Terminal path segment of a queue locator.
///
/// `https://sqs.eu-west-1.amazonaws.com/123456789012/my-queue` → `my-queue`.
/// Trailing slashes are ignored.
pub fn derive_name(locator: &str) -> Result<String> {
    let url = Url::parse(locator)
        .map_err(|e| QBridgeError::InvalidLocator(format!("{locator}: {e}")))?;

    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(|s| s.to_string())
        .ok_or_else(|| QBridgeError::InvalidLocator(format!("{locator}: no path segment")))
}

/// Raw attribute values fetched for one queue during one scrape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueAttributes {
    values: HashMap<String, String>,
}

impl QueueAttributes {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Numeric value of `key`. Missing keys read as `0`; unparsable values are
    /// logged and read as `0`.
    pub fn value(&self, key: &str) -> f64 {
        match self.values.get(key) {
            None => 0.0,
            Some(raw) => parse_value(key, raw),
        }
    }
}

impl From<HashMap<String, String>> for QueueAttributes {
    fn from(values: HashMap<String, String>) -> Self {
        Self::new(values)
    }
}

fn parse_value(key: &str, raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(attribute = %key, value = %raw, error = %e, "failed to parse attribute value as f64");
            0.0
        }
    }
}
