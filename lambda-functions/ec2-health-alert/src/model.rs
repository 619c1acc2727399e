use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of an instance as reported by EC2.
///
/// Values EC2 adds later are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LifecycleState {
    Pending,
    Running,
    ShuttingDown,
    Terminated,
    Stopping,
    Stopped,
    Other(String),
}

impl LifecycleState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for LifecycleState {
    fn from(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "shutting-down" => Self::ShuttingDown,
            "terminated" => Self::Terminated,
            "stopping" => Self::Stopping,
            "stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for LifecycleState {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<LifecycleState> for String {
    fn from(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict of one EC2 status check (system or instance reachability).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusVerdict {
    Ok,
    Impaired,
    InsufficientData,
    NotApplicable,
    Initializing,
    Other(String),
}

impl StatusVerdict {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "ok",
            Self::Impaired => "impaired",
            Self::InsufficientData => "insufficient-data",
            Self::NotApplicable => "not-applicable",
            Self::Initializing => "initializing",
            Self::Other(value) => value,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.as_str() == "ok"
    }
}

impl From<&str> for StatusVerdict {
    fn from(value: &str) -> Self {
        match value {
            "ok" => Self::Ok,
            "impaired" => Self::Impaired,
            "insufficient-data" => Self::InsufficientData,
            "not-applicable" => Self::NotApplicable,
            "initializing" => Self::Initializing,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StatusVerdict {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<StatusVerdict> for String {
    fn from(verdict: StatusVerdict) -> Self {
        match verdict {
            StatusVerdict::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StatusVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single instance at observation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceHealthRecord {
    #[serde(rename = "InstanceId")]
    pub instance_id: String,
    #[serde(rename = "State")]
    pub lifecycle_state: LifecycleState,
    #[serde(rename = "SystemStatus")]
    pub system_status: StatusVerdict,
    #[serde(rename = "InstanceStatus")]
    pub instance_status: StatusVerdict,
}

impl InstanceHealthRecord {
    pub fn new(
        instance_id: impl Into<String>,
        lifecycle_state: impl Into<LifecycleState>,
        system_status: impl Into<StatusVerdict>,
        instance_status: impl Into<StatusVerdict>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            lifecycle_state: lifecycle_state.into(),
            system_status: system_status.into(),
            instance_status: instance_status.into(),
        }
    }

    /// Either status check deviates from `ok`. The lifecycle state is ignored.
    pub fn is_unhealthy(&self) -> bool {
        !self.system_status.is_ok() || !self.instance_status.is_ok()
    }
}

/// Everything observed in one invocation; archived and returned as the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub timestamp: DateTime<Utc>,
    pub region: String,
    pub all_instances: Vec<InstanceHealthRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unhealthy_predicate() {
        let healthy = InstanceHealthRecord::new("i-1", "running", "ok", "ok");
        let system_down = InstanceHealthRecord::new("i-2", "running", "impaired", "ok");
        let instance_down = InstanceHealthRecord::new("i-3", "running", "ok", "impaired");
        let initializing = InstanceHealthRecord::new("i-4", "pending", "initializing", "ok");

        assert!(!healthy.is_unhealthy());
        assert!(system_down.is_unhealthy());
        assert!(instance_down.is_unhealthy());
        assert!(initializing.is_unhealthy());
    }

    #[test]
    fn test_directly_built_ok_verdict_is_healthy() {
        let record = InstanceHealthRecord {
            instance_id: "i-5".to_string(),
            lifecycle_state: LifecycleState::Running,
            system_status: StatusVerdict::Other("ok".to_string()),
            instance_status: StatusVerdict::Ok,
        };
        assert!(!record.is_unhealthy());
    }

    #[test]
    fn test_lifecycle_state_does_not_affect_classification() {
        let stopped = InstanceHealthRecord::new("i-1", "stopped", "ok", "ok");
        assert!(!stopped.is_unhealthy());

        let stopped_na = InstanceHealthRecord::new("i-2", "stopped", "not-applicable", "ok");
        assert!(stopped_na.is_unhealthy());
    }

    #[test]
    fn test_unknown_values_kept_verbatim() {
        let state = LifecycleState::from("hibernating");
        assert_eq!(state, LifecycleState::Other("hibernating".to_string()));
        assert_eq!(state.to_string(), "hibernating");

        let verdict = StatusVerdict::from("unknown");
        assert!(!verdict.is_ok());
        assert_eq!(String::from(verdict), "unknown");
    }

    #[test]
    fn test_record_serialization_keys() {
        let record = InstanceHealthRecord::new("i-0abc", "shutting-down", "ok", "insufficient-data");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["InstanceId"], "i-0abc");
        assert_eq!(json["State"], "shutting-down");
        assert_eq!(json["SystemStatus"], "ok");
        assert_eq!(json["InstanceStatus"], "insufficient-data");

        let parsed: InstanceHealthRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.lifecycle_state, LifecycleState::ShuttingDown);
        assert_eq!(parsed.instance_status, StatusVerdict::InsufficientData);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = HealthSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap(),
            region: "ap-south-1".to_string(),
            all_instances: vec![InstanceHealthRecord::new("i-1", "running", "ok", "ok")],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["timestamp"], "2025-01-06T12:00:00Z");
        assert_eq!(json["region"], "ap-south-1");
        assert_eq!(json["all_instances"][0]["InstanceId"], "i-1");
    }
}
