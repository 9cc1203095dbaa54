//! Scripted in-memory `QueueApi` shared by the integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use qbridge_core::error::{QBridgeError, Result};
use qbridge_core::queue::QueueAttributes;
use qbridge_exporter::upstream::QueueApi;

pub fn locator(name: &str) -> String {
    format!("https://sqs.us-east-1.amazonaws.com/123456789012/{name}")
}

#[derive(Default)]
struct State {
    queues: Vec<String>,
    tags: HashMap<String, BTreeMap<String, String>>,
    attributes: HashMap<String, HashMap<String, String>>,
    delays: HashMap<String, Duration>,
    fail_list: bool,
    fail_tags: HashSet<String>,
    fail_attributes: HashSet<String>,
    list_calls: Vec<Option<String>>,
    tag_calls: usize,
    attribute_calls: Vec<(String, Vec<String>)>,
}

/// Queue names are registered in listing order; the prefix is applied the way
/// the real service does it, against the queue name.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queues(names: &[&str]) -> Self {
        let api = Self::new();
        for n in names {
            api.add_queue(n);
        }
        api
    }

    pub fn add_queue(&self, name: &str) {
        self.state.lock().unwrap().queues.push(name.to_string());
    }

    pub fn set_tag(&self, name: &str, key: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .tags
            .entry(name.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn set_attribute(&self, name: &str, key: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .attributes
            .entry(name.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn set_delay(&self, name: &str, delay: Duration) {
        self.state.lock().unwrap().delays.insert(name.to_string(), delay);
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn fail_tags_for(&self, name: &str) {
        self.state.lock().unwrap().fail_tags.insert(name.to_string());
    }

    pub fn fail_attributes_for(&self, name: &str) {
        self.state.lock().unwrap().fail_attributes.insert(name.to_string());
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().list_calls.clone()
    }

    pub fn tag_calls(&self) -> usize {
        self.state.lock().unwrap().tag_calls
    }

    pub fn attribute_calls(&self) -> Vec<(String, Vec<String>)> {
        self.state.lock().unwrap().attribute_calls.clone()
    }
}

fn name_of(locator: &str) -> String {
    locator.rsplit('/').next().unwrap().to_string()
}

#[async_trait]
impl QueueApi for FakeApi {
    async fn list_queues(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let mut st = self.state.lock().unwrap();
        st.list_calls.push(prefix.map(str::to_string));
        if st.fail_list {
            return Err(QBridgeError::Upstream("ListQueues: service unavailable".into()));
        }
        Ok(st
            .queues
            .iter()
            .filter(|n| prefix.map_or(true, |p| n.starts_with(p)))
            .map(|n| locator(n))
            .collect())
    }

    async fn queue_tags(&self, locator: &str) -> Result<BTreeMap<String, String>> {
        let name = name_of(locator);
        let mut st = self.state.lock().unwrap();
        st.tag_calls += 1;
        if st.fail_tags.contains(&name) {
            return Err(QBridgeError::Upstream(format!("ListQueueTags: access denied for {name}")));
        }
        Ok(st.tags.get(&name).cloned().unwrap_or_default())
    }

    async fn queue_attributes(&self, locator: &str, keys: &[&str]) -> Result<QueueAttributes> {
        let name = name_of(locator);
        let delay = {
            let mut st = self.state.lock().unwrap();
            st.attribute_calls
                .push((name.clone(), keys.iter().map(|k| k.to_string()).collect()));
            st.delays.get(&name).copied()
        };
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }

        let st = self.state.lock().unwrap();
        if st.fail_attributes.contains(&name) {
            return Err(QBridgeError::Upstream(format!(
                "GetQueueAttributes: queue does not exist: {name}"
            )));
        }
        let values = st.attributes.get(&name).cloned().unwrap_or_default();
        Ok(QueueAttributes::new(
            values
                .into_iter()
                .filter(|(k, _)| keys.contains(&k.as_str()))
                .collect(),
        ))
    }
}
