use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;
use aws_smithy_runtime::client::http::test_util::{capture_request, CaptureRequestReceiver};
use aws_smithy_runtime_api::client::orchestrator::HttpRequest;

/// SDK config whose HTTP client records the outgoing request instead of
/// sending it. The call gets an empty 200 back and is never retried.
pub(crate) async fn capturing_sdk_config(
    region: &'static str,
) -> (SdkConfig, CaptureRequestReceiver) {
    let (http_client, requests) = capture_request(None);

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .http_client(http_client)
        .retry_config(RetryConfig::disabled())
        .load()
        .await;

    (sdk_config, requests)
}

pub(crate) fn request_body(request: &HttpRequest) -> String {
    String::from_utf8_lossy(request.body().bytes().unwrap_or_default()).into_owned()
}
