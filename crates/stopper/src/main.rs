//! `dbops-stopper` -- stops idle RDS instances on a schedule.
//!
//! Runs inside the function runtime; an external scheduler triggers it.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default | Description                               |
//! |--------------------|----------|---------|-------------------------------------------|
//! | `AWS_REGION`       | no       | SDK     | Region to scan                            |
//! | `RDS_ENDPOINT_URL` | no       | --      | Endpoint override (local emulators)       |
//! | `DRY_RUN`          | no       | `false` | Log what would be stopped without stopping |
//! | `LOG_FORMAT`       | no       | `json`  | `json` or `text`                          |
//!
//! # Response
//!
//! `{"statusCode": 200, "body": {stopped_instances, total_stopped, errors,
//! timestamp, request_id}}`. `body.timestamp` is the RFC 3339 time of the
//! invocation. The invocation's request id is reported in `body.request_id`;
//! earlier versions of this handler put the request id in `timestamp`, so
//! consumers reading it from there must switch fields.

use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use dbops_stopper::config::{LogFormat, StopperConfig};
use dbops_stopper::handler;
use dbops_stopper::rds::AwsRds;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dotenvy::dotenv().ok();

    let config = StopperConfig::from_env();

    // The function runtime timestamps every log line itself.
    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .without_time()
            .with_current_span(false)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbops_stopper=info".into()),
        )
        .init();

    tracing::info!(
        dry_run = config.dry_run,
        endpoint_url = ?config.endpoint_url,
        "Starting dbops-stopper",
    );

    let api = AwsRds::from_config(&config).await;
    let api = &api;
    let config = &config;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        let response =
            handler::handle(api, config, &event.context.request_id, &event.payload).await;
        Ok::<_, lambda_runtime::Error>(response)
    }))
    .await
}
