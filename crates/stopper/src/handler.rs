//! Scheduled function handler.
//!
//! The event payload is ignored; each invocation is a full pass over the
//! region. The response always carries status code 200, with failures
//! reported in `body.errors`.

use serde_json::Value;

use dbops_core::summary::InvocationResponse;

use crate::config::StopperConfig;
use crate::rds::RdsApi;
use crate::stopper::{self, StopOptions};

pub async fn handle<A: RdsApi + ?Sized>(
    api: &A,
    config: &StopperConfig,
    request_id: &str,
    _event: &Value,
) -> InvocationResponse {
    let options = StopOptions {
        dry_run: config.dry_run,
    };

    let summary = stopper::stop_idle_instances(api, options, request_id).await;

    tracing::info!(
        request_id,
        total_stopped = summary.total_stopped,
        "Execution completed",
    );

    InvocationResponse::from(summary)
}
