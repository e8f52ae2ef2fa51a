//! RDS seam.
//!
//! [`RdsApi`] is everything the stopper needs from the provider. [`AwsRds`]
//! implements it with the AWS SDK; tests use an in-memory fake.

use async_trait::async_trait;
use aws_sdk_rds::error::DisplayErrorContext;
use aws_sdk_rds::types::{DbInstance, Tag};

use dbops_core::instance::{DatabaseInstance, InstanceStatus};
use dbops_core::tags::TagSet;

use crate::config::StopperConfig;
use crate::error::RdsError;

#[async_trait]
pub trait RdsApi: Send + Sync {
    /// Every instance in the region, across all result pages.
    async fn list_instances(&self) -> Result<Vec<DatabaseInstance>, RdsError>;

    /// Current tags of the resource named by `arn`.
    async fn list_tags(&self, arn: &str) -> Result<TagSet, RdsError>;

    /// Request a stop. Returns once the provider accepted the request.
    async fn stop_instance(&self, identifier: &str) -> Result<(), RdsError>;
}

/// [`RdsApi`] backed by `aws-sdk-rds`.
#[derive(Debug, Clone)]
pub struct AwsRds {
    client: aws_sdk_rds::Client,
}

impl AwsRds {
    pub fn new(client: aws_sdk_rds::Client) -> Self {
        Self { client }
    }

    /// Build a client from the SDK default provider chain.
    pub async fn from_config(config: &StopperConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;
        Self::new(aws_sdk_rds::Client::new(&sdk_config))
    }
}

#[async_trait]
impl RdsApi for AwsRds {
    async fn list_instances(&self) -> Result<Vec<DatabaseInstance>, RdsError> {
        let raw: Vec<DbInstance> = self
            .client
            .describe_db_instances()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(|e| RdsError::Describe(DisplayErrorContext(&e).to_string()))?;

        Ok(raw.iter().filter_map(to_domain).collect())
    }

    async fn list_tags(&self, arn: &str) -> Result<TagSet, RdsError> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource_name(arn)
            .send()
            .await
            .map_err(|e| RdsError::ListTags(DisplayErrorContext(&e).to_string()))?;

        Ok(to_tag_set(output.tag_list()))
    }

    async fn stop_instance(&self, identifier: &str) -> Result<(), RdsError> {
        self.client
            .stop_db_instance()
            .db_instance_identifier(identifier)
            .send()
            .await
            .map_err(|e| RdsError::Stop(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// Convert an SDK instance. Entries without an identifier cannot be acted
/// on and are dropped.
fn to_domain(db: &DbInstance) -> Option<DatabaseInstance> {
    let Some(identifier) = db.db_instance_identifier() else {
        tracing::warn!(arn = ?db.db_instance_arn(), "Skipping instance without identifier");
        return None;
    };

    Some(DatabaseInstance {
        identifier: identifier.to_string(),
        status: InstanceStatus::from_provider(db.db_instance_status().unwrap_or_default()),
        engine: db.engine().unwrap_or_default().to_string(),
        arn: db.db_instance_arn().map(str::to_string),
    })
}

fn to_tag_set(tags: &[Tag]) -> TagSet {
    tags.iter()
        .filter_map(|tag| Some((tag.key()?, tag.value().unwrap_or_default())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_sdk_instance() {
        let db = DbInstance::builder()
            .db_instance_identifier("orders-dev")
            .db_instance_status("available")
            .engine("postgres")
            .db_instance_arn("arn:aws:rds:eu-west-1:123456789012:db:orders-dev")
            .build();

        let instance = to_domain(&db).unwrap();

        assert_eq!(instance.identifier, "orders-dev");
        assert_eq!(instance.status, InstanceStatus::Available);
        assert_eq!(instance.engine, "postgres");
        assert!(instance.arn.unwrap().ends_with(":db:orders-dev"));
    }

    #[test]
    fn instance_without_identifier_is_dropped() {
        let db = DbInstance::builder().db_instance_status("available").build();
        assert!(to_domain(&db).is_none());
    }

    #[test]
    fn tag_without_key_is_ignored() {
        let tags = vec![
            Tag::builder().value("orphan").build(),
            Tag::builder().key("Owner").build(),
        ];
        let set = to_tag_set(&tags);
        assert_eq!(set.len(), 1);
        assert!(set.value_equals("owner", ""));
    }
}
