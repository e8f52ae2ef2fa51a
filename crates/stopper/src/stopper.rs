//! Stop dispatch loop.
//!
//! Walks every instance once, in provider order, and turns each into an
//! [`InstanceOutcome`]. A failure on one instance is recorded and the loop
//! moves on; only a failed listing ends the pass early.

use chrono::Utc;

use dbops_core::eligibility::{self, StopDecision};
use dbops_core::instance::{DatabaseInstance, InstanceStatus};
use dbops_core::summary::{
    ExecutionSummary, InstanceOutcome, StoppedInstance, STOP_DRY_RUN, STOP_INITIATED,
};

use crate::error::RdsError;
use crate::rds::RdsApi;

/// Knobs for a single pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopOptions {
    pub dry_run: bool,
}

/// List all instances and stop the idle, eligible ones.
pub async fn stop_idle_instances<A: RdsApi + ?Sized>(
    api: &A,
    options: StopOptions,
    request_id: &str,
) -> ExecutionSummary {
    let mut summary = ExecutionSummary::new(request_id, Utc::now().to_rfc3339());

    let instances = match api.list_instances().await {
        Ok(instances) => instances,
        Err(e) => {
            let error = format!("Failed to list RDS instances: {e}");
            tracing::error!(request_id, error = %e, "Failed to list RDS instances");
            summary.record_error(error);
            return summary;
        }
    };

    tracing::info!(request_id, count = instances.len(), "Listed database instances");

    for instance in &instances {
        let outcome = process_instance(api, instance, options).await;
        summary.record(outcome);
    }

    tracing::info!(
        request_id,
        total_stopped = summary.total_stopped,
        errors = summary.errors.len(),
        dry_run = options.dry_run,
        "Stop pass complete",
    );

    summary
}

/// Decide and act on one instance.
pub async fn process_instance<A: RdsApi + ?Sized>(
    api: &A,
    instance: &DatabaseInstance,
    options: StopOptions,
) -> InstanceOutcome {
    let id = instance.identifier.as_str();

    tracing::info!(
        instance = id,
        status = %instance.status,
        engine = %instance.engine,
        "Processing database",
    );

    match &instance.status {
        InstanceStatus::Available => {}
        status if status.is_stopped_or_stopping() => {
            tracing::info!(instance = id, status = %status, "Already stopped or stopping");
            return not_running(instance);
        }
        status => {
            tracing::info!(instance = id, status = %status, "Not available, skipping");
            return not_running(instance);
        }
    }

    let tags = match instance.arn.as_deref() {
        Some(arn) => api.list_tags(arn).await,
        None => Err(RdsError::MissingArn(id.to_string())),
    };

    let tags = match tags {
        Ok(tags) => tags,
        Err(e) => {
            tracing::error!(instance = id, error = %e, "Failed to check tags, not stopping");
            return InstanceOutcome::Failed {
                identifier: id.to_string(),
                error: format!("Failed to check tags for {id}: {e}"),
            };
        }
    };

    let decision = eligibility::evaluate(id, &tags);
    tracing::debug!(
        instance = id,
        tag_count = tags.len(),
        untagged = tags.is_empty(),
        eligible = decision.is_eligible(),
        "Evaluated stop policy",
    );

    if let StopDecision::Ineligible(reason) = decision {
        tracing::info!(instance = id, %reason, "Skipping protected database");
        return InstanceOutcome::Protected {
            identifier: id.to_string(),
            reason,
        };
    }

    if options.dry_run {
        tracing::info!(instance = id, "Dry run, would stop database");
        return stopped(instance, STOP_DRY_RUN);
    }

    tracing::info!(instance = id, "Stopping database");
    match api.stop_instance(id).await {
        Ok(()) => stopped(instance, STOP_INITIATED),
        Err(e) => {
            tracing::error!(instance = id, error = %e, "Failed to stop database");
            InstanceOutcome::Failed {
                identifier: id.to_string(),
                error: format!("Failed to stop {id}: {e}"),
            }
        }
    }
}

fn stopped(instance: &DatabaseInstance, status: &'static str) -> InstanceOutcome {
    InstanceOutcome::Stopped(StoppedInstance {
        identifier: instance.identifier.clone(),
        engine: instance.engine.clone(),
        status,
    })
}

fn not_running(instance: &DatabaseInstance) -> InstanceOutcome {
    InstanceOutcome::NotRunning {
        identifier: instance.identifier.clone(),
        status: instance.status.clone(),
    }
}
