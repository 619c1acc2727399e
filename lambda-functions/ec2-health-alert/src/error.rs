use aws_smithy_types::error::display::DisplayErrorContext;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Flattens an SDK error and its source chain into one message, service error
/// code included.
pub fn sdk_error<E: std::error::Error>(err: E) -> BoxError {
    DisplayErrorContext(err).to_string().into()
}

/// Failure of one of the collaborator calls made during an invocation.
///
/// Each variant names the stage that failed so the Lambda runtime's error
/// report says where the invocation stopped.
#[derive(Debug, Error)]
pub enum HealthAlertError {
    #[error("failed to describe instance status in region {region}: {source}")]
    DescribeStatus {
        region: String,
        #[source]
        source: BoxError,
    },

    #[error("instance status entry in region {region} has no instance id")]
    MalformedStatus { region: String },

    #[error("failed to publish alert for instance {instance_id} to {topic}: {source}")]
    Publish {
        instance_id: String,
        topic: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to serialize health snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write s3://{bucket}/{key}: {source}")]
    Archive {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages_name_the_stage() {
        let err = HealthAlertError::Archive {
            bucket: "logs".to_string(),
            key: "prefix/2025-01-01T00-00-00.log".to_string(),
            source: "access denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write s3://logs/prefix/2025-01-01T00-00-00.log: access denied"
        );
        assert_eq!(err.source().unwrap().to_string(), "access denied");

        let err = HealthAlertError::MalformedStatus {
            region: "ap-south-1".to_string(),
        };
        assert!(err.to_string().contains("ap-south-1"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_error_messages_carry_the_cause() {
        let err = HealthAlertError::DescribeStatus {
            region: "ap-south-1".to_string(),
            source: "UnauthorizedOperation: You are not authorized to perform this operation."
                .into(),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to describe instance status in region ap-south-1"));
        assert!(message.contains("UnauthorizedOperation"));

        let err = HealthAlertError::Publish {
            instance_id: "i-1".to_string(),
            topic: "arn:topic".to_string(),
            source: "AuthorizationError".into(),
        };
        assert!(err.to_string().contains("AuthorizationError"));
    }

    #[test]
    fn test_sdk_error_keeps_source_chain() {
        let inner = HealthAlertError::DescribeStatus {
            region: "us-east-1".to_string(),
            source: "Throttling: Rate exceeded".into(),
        };

        let flattened = sdk_error(inner);
        assert!(flattened.to_string().contains("Throttling: Rate exceeded"));
        assert!(flattened.to_string().contains("us-east-1"));
    }
}
