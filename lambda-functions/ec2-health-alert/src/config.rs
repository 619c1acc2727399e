use bon::Builder;

pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_TOPIC_ARN: &str = "arn:aws:sns:ap-south-1:711387098945:Alerting";
pub const DEFAULT_ALERT_SUBJECT: &str = "EC2 Health Check Alert";
pub const DEFAULT_LOG_BUCKET: &str = "logging-bucket-oct24";
pub const DEFAULT_LOG_PREFIX: &str = "ec2-health-check-logs";

/// Deploy-time settings for the alerting function.
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct AlertConfig {
    /// Region checked when the trigger event carries none.
    #[builder(into, default = DEFAULT_REGION.to_string())]
    pub default_region: String,

    #[builder(into, default = DEFAULT_TOPIC_ARN.to_string())]
    pub topic_arn: String,

    #[builder(into, default = DEFAULT_ALERT_SUBJECT.to_string())]
    pub alert_subject: String,

    #[builder(into, default = DEFAULT_LOG_BUCKET.to_string())]
    pub log_bucket: String,

    #[builder(into, default = DEFAULT_LOG_PREFIX.to_string())]
    pub log_prefix: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AlertConfig {
    /// Reads overrides from the Lambda environment, falling back to the
    /// built-in defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Self {
            default_region: var("DEFAULT_REGION", DEFAULT_REGION),
            topic_arn: var("SNS_TOPIC_ARN", DEFAULT_TOPIC_ARN),
            alert_subject: var("ALERT_SUBJECT", DEFAULT_ALERT_SUBJECT),
            log_bucket: var("LOG_BUCKET", DEFAULT_LOG_BUCKET),
            log_prefix: var("LOG_PREFIX", DEFAULT_LOG_PREFIX),
        }
    }
}
