pub mod archive;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod notify;
pub mod service;

#[cfg(test)]
mod test_support;

use serde::{Deserialize, Serialize};

pub use archive::{archive_key, archive_snapshot, ObjectStore, S3ObjectStore};
pub use config::AlertConfig;
pub use error::{BoxError, HealthAlertError};
pub use evaluator::{
    partition_unhealthy, Ec2StatusSource, Evaluation, HealthEvaluator, StatusSource,
};
pub use model::{HealthSnapshot, InstanceHealthRecord, LifecycleState, StatusVerdict};
pub use notify::{dispatch_alerts, format_alert_message, Notifier, SnsNotifier};
pub use service::{AwsHealthAlertService, HealthAlertService};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub region: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Compact JSON encoding of the [`HealthSnapshot`].
    pub body: String,
}

impl Response {
    pub fn ok(snapshot: &HealthSnapshot) -> Result<Self, HealthAlertError> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(snapshot)?,
        })
    }
}
