use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::types::InstanceStatus;
use aws_sdk_ec2::Client as Ec2Client;
use tracing::{info, warn};

use crate::error::{sdk_error, HealthAlertError};
use crate::model::InstanceHealthRecord;

/// Placeholder for state or status fields EC2 leaves out of a response.
pub const UNKNOWN: &str = "unknown";

/// Source of per-instance status checks for a region.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn describe_statuses(
        &self,
        region: &str,
    ) -> Result<Vec<InstanceHealthRecord>, HealthAlertError>;
}

/// `DescribeInstanceStatus` against EC2, including stopped instances.
pub struct Ec2StatusSource {
    sdk_config: SdkConfig,
}

impl Ec2StatusSource {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            sdk_config: sdk_config.clone(),
        }
    }

    fn client_for(&self, region: &str) -> Ec2Client {
        let config = aws_sdk_ec2::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_string()))
            .build();
        Ec2Client::from_conf(config)
    }
}

#[async_trait]
impl StatusSource for Ec2StatusSource {
    async fn describe_statuses(
        &self,
        region: &str,
    ) -> Result<Vec<InstanceHealthRecord>, HealthAlertError> {
        let output = self
            .client_for(region)
            .describe_instance_status()
            .include_all_instances(true)
            .send()
            .await
            .map_err(|e| HealthAlertError::DescribeStatus {
                region: region.to_string(),
                source: sdk_error(e),
            })?;

        output
            .instance_statuses()
            .iter()
            .map(|status| record_from_status(region, status))
            .collect()
    }
}

/// Converts one EC2 status entry into a record.
pub fn record_from_status(
    region: &str,
    status: &InstanceStatus,
) -> Result<InstanceHealthRecord, HealthAlertError> {
    let instance_id = status
        .instance_id()
        .ok_or_else(|| HealthAlertError::MalformedStatus {
            region: region.to_string(),
        })?;

    let lifecycle_state = status
        .instance_state()
        .and_then(|state| state.name())
        .map(|name| name.as_str())
        .unwrap_or(UNKNOWN);
    let system_status = status
        .system_status()
        .and_then(|summary| summary.status())
        .map(|s| s.as_str())
        .unwrap_or(UNKNOWN);
    let instance_status = status
        .instance_status()
        .and_then(|summary| summary.status())
        .map(|s| s.as_str())
        .unwrap_or(UNKNOWN);

    Ok(InstanceHealthRecord::new(
        instance_id,
        lifecycle_state,
        system_status,
        instance_status,
    ))
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    /// Every record in provider order.
    pub all_instances: Vec<InstanceHealthRecord>,
    /// Subsequence of `all_instances` failing either status check.
    pub unhealthy_instances: Vec<InstanceHealthRecord>,
}

/// Splits records into all and unhealthy, preserving relative order.
pub fn partition_unhealthy(all_instances: Vec<InstanceHealthRecord>) -> Evaluation {
    let unhealthy_instances = all_instances
        .iter()
        .filter(|record| record.is_unhealthy())
        .cloned()
        .collect();

    Evaluation {
        all_instances,
        unhealthy_instances,
    }
}

pub struct HealthEvaluator<S> {
    source: S,
}

impl<S: StatusSource> HealthEvaluator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn evaluate(&self, region: &str) -> Result<Evaluation, HealthAlertError> {
        let records = self.source.describe_statuses(region).await?;
        let evaluation = partition_unhealthy(records);

        for record in &evaluation.unhealthy_instances {
            warn!(
                "Instance {} is unhealthy: system={} instance={}",
                record.instance_id, record.system_status, record.instance_status
            );
        }

        info!(
            "Evaluated {} instances in {}, {} unhealthy",
            evaluation.all_instances.len(),
            region,
            evaluation.unhealthy_instances.len()
        );

        Ok(evaluation)
    }
}
