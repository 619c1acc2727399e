use aws_config::{BehaviorVersion, SdkConfig};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::archive::{archive_snapshot, ObjectStore, S3ObjectStore};
use crate::config::AlertConfig;
use crate::error::HealthAlertError;
use crate::evaluator::{Ec2StatusSource, HealthEvaluator, StatusSource};
use crate::model::HealthSnapshot;
use crate::notify::{dispatch_alerts, Notifier, SnsNotifier};
use crate::{Request, Response};

/// Service wired to EC2, SNS and S3.
pub type AwsHealthAlertService = HealthAlertService<Ec2StatusSource, SnsNotifier, S3ObjectStore>;

/// Runs one check: evaluate, alert on unhealthy instances, archive the snapshot.
pub struct HealthAlertService<S, N, O> {
    evaluator: HealthEvaluator<S>,
    notifier: N,
    store: O,
    config: AlertConfig,
}

impl AwsHealthAlertService {
    pub async fn new(config: AlertConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::from_sdk_config(&sdk_config, config)
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, config: AlertConfig) -> Self {
        Self::with_collaborators(
            Ec2StatusSource::new(sdk_config),
            SnsNotifier::new(sdk_config),
            S3ObjectStore::new(sdk_config),
            config,
        )
    }
}

impl<S, N, O> HealthAlertService<S, N, O>
where
    S: StatusSource,
    N: Notifier,
    O: ObjectStore,
{
    pub fn with_collaborators(source: S, notifier: N, store: O, config: AlertConfig) -> Self {
        Self {
            evaluator: HealthEvaluator::new(source),
            notifier,
            store,
            config,
        }
    }

    /// Region named by the event, or the configured default.
    pub fn resolve_region(&self, request: &Request) -> String {
        request
            .region
            .clone()
            .unwrap_or_else(|| self.config.default_region.clone())
    }

    pub async fn run_health_check(&self, request: Request) -> Result<Response, HealthAlertError> {
        self.run_health_check_at(request, Utc::now()).await
    }

    /// Same as [`run_health_check`](Self::run_health_check) with the snapshot
    /// time supplied by the caller.
    pub async fn run_health_check_at(
        &self,
        request: Request,
        timestamp: DateTime<Utc>,
    ) -> Result<Response, HealthAlertError> {
        let region = self.resolve_region(&request);
        info!("Checking EC2 instance health in {}", region);

        let evaluation = self
            .evaluator
            .evaluate(&region)
            .await
            .inspect_err(|e| error!("Failed to evaluate instance health: {}", e))?;

        dispatch_alerts(
            &self.notifier,
            &self.config.topic_arn,
            &self.config.alert_subject,
            &evaluation.unhealthy_instances,
        )
        .await
        .inspect_err(|e| error!("Failed to send alerts: {}", e))?;

        let snapshot = HealthSnapshot {
            timestamp,
            region,
            all_instances: evaluation.all_instances,
        };

        archive_snapshot(
            &self.store,
            &self.config.log_bucket,
            &self.config.log_prefix,
            &snapshot,
        )
        .await
        .inspect_err(|e| error!("Failed to archive health snapshot: {}", e))?;

        Response::ok(&snapshot)
    }
}
