use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::Client as SnsClient;
use tracing::info;

use crate::error::{sdk_error, BoxError, HealthAlertError};
use crate::model::InstanceHealthRecord;

/// Publish side of a pub/sub topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), BoxError>;
}

pub struct SnsNotifier {
    client: SnsClient,
}

impl SnsNotifier {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: SnsClient::new(sdk_config),
        }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), BoxError> {
        self.client
            .publish()
            .topic_arn(topic)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }
}

/// Plain-text alert body for one unhealthy instance.
pub fn format_alert_message(record: &InstanceHealthRecord) -> String {
    format!(
        "EC2 Health Check Alert:\n\n\
         Instance ID: {}\n\
         State: {}\n\
         System Status: {}\n\
         Instance Status: {}",
        record.instance_id, record.lifecycle_state, record.system_status, record.instance_status
    )
}

/// Publishes one alert per record, in order. The first failed publish aborts
/// the loop; alerts already sent stay sent.
pub async fn dispatch_alerts<N: Notifier + ?Sized>(
    notifier: &N,
    topic: &str,
    subject: &str,
    unhealthy_instances: &[InstanceHealthRecord],
) -> Result<usize, HealthAlertError> {
    if unhealthy_instances.is_empty() {
        info!("All instances are healthy");
        return Ok(0);
    }

    for record in unhealthy_instances {
        let message = format_alert_message(record);
        notifier
            .publish(topic, subject, &message)
            .await
            .map_err(|source| HealthAlertError::Publish {
                instance_id: record.instance_id.clone(),
                topic: topic.to_string(),
                source,
            })?;
    }

    info!(
        "Sent alert for {} unhealthy instances via SNS",
        unhealthy_instances.len()
    );

    Ok(unhealthy_instances.len())
}
