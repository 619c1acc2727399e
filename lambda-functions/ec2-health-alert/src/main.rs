use ec2_health_alert::{AlertConfig, AwsHealthAlertService, Request, Response};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(
    service: &AwsHealthAlertService,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    Ok(service.run_health_check(event.payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let service = AwsHealthAlertService::new(AlertConfig::from_env()).await;

    run(service_fn(|event| function_handler(&service, event))).await
}
