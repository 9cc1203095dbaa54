//! `QueueApi` over the AWS SQS SDK.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;

use qbridge_core::error::{QBridgeError, Result};
use qbridge_core::queue::QueueAttributes;

use super::QueueApi;
use crate::config::UpstreamSection;

/// Page size for `ListQueues`. Setting it is what makes SQS paginate.
const LIST_PAGE_SIZE: i32 = 1000;

pub struct SqsApi {
    client: Client,
}

impl SqsApi {
    /// Build a client from the SDK default chain plus `cfg` overrides.
    pub async fn connect(cfg: &UpstreamSection) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &cfg.region {
            loader = loader.region(aws_sdk_sqs::config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_sqs::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &cfg.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Self::from_client(Client::from_conf(builder.build()))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn upstream_err<E>(op: &str, err: E) -> QBridgeError
where
    E: std::error::Error,
{
    QBridgeError::Upstream(format!("{op}: {}", DisplayErrorContext(err)))
}

#[async_trait]
impl QueueApi for SqsApi {
    async fn list_queues(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let mut locators = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let out = self
                .client
                .list_queues()
                .set_queue_name_prefix(prefix.map(str::to_string))
                .max_results(LIST_PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| upstream_err("ListQueues", e))?;

            locators.extend(out.queue_urls().iter().cloned());

            match out.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(locators)
    }

    async fn queue_tags(&self, locator: &str) -> Result<BTreeMap<String, String>> {
        let out = self
            .client
            .list_queue_tags()
            .queue_url(locator)
            .send()
            .await
            .map_err(|e| upstream_err("ListQueueTags", e))?;

        Ok(out
            .tags()
            .map(|tags| tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    async fn queue_attributes(&self, locator: &str, keys: &[&str]) -> Result<QueueAttributes> {
        let names: Vec<QueueAttributeName> =
            keys.iter().map(|k| QueueAttributeName::from(*k)).collect();

        let out = self
            .client
            .get_queue_attributes()
            .queue_url(locator)
            .set_attribute_names(Some(names))
            .send()
            .await
            .map_err(|e| upstream_err("GetQueueAttributes", e))?;

        let values: HashMap<String, String> = out
            .attributes()
            .map(|attrs| {
                attrs
                    .iter()
                    .map(|(k, v)| (k.as_str().to_string(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(QueueAttributes::new(values))
    }
}
