//! Per-instance outcomes and the summary returned by the stopper.

use serde::Serialize;

use crate::eligibility::IneligibleReason;
use crate::instance::InstanceStatus;

/// Status recorded for an instance the stopper asked the provider to stop.
pub const STOP_INITIATED: &str = "stop_initiated";

/// Status recorded for an eligible instance when running in dry-run mode.
pub const STOP_DRY_RUN: &str = "dry_run";

/// HTTP-style status code the handler always returns.
pub const RESPONSE_STATUS_OK: u16 = 200;

/// An instance the stopper acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoppedInstance {
    pub identifier: String,
    pub engine: String,
    pub status: &'static str,
}

/// What happened to a single instance during one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceOutcome {
    Stopped(StoppedInstance),
    /// Policy said no.
    Protected {
        identifier: String,
        reason: IneligibleReason,
    },
    /// Not `available`, nothing to do.
    NotRunning {
        identifier: String,
        status: InstanceStatus,
    },
    /// A provider call failed; the message goes into the error list.
    Failed { identifier: String, error: String },
}

/// Result of one stopper invocation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionSummary {
    pub stopped_instances: Vec<StoppedInstance>,
    pub total_stopped: usize,
    pub errors: Vec<String>,
    pub timestamp: String,
    pub request_id: String,
}

impl ExecutionSummary {
    pub fn new(request_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: timestamp.into(),
            ..Self::default()
        }
    }

    /// Fold one instance outcome into the summary.
    pub fn record(&mut self, outcome: InstanceOutcome) {
        match outcome {
            InstanceOutcome::Stopped(stopped) => {
                self.stopped_instances.push(stopped);
                self.total_stopped = self.stopped_instances.len();
            }
            InstanceOutcome::Failed { error, .. } => self.errors.push(error),
            InstanceOutcome::Protected { .. } | InstanceOutcome::NotRunning { .. } => {}
        }
    }

    /// Record an error not tied to a single instance (e.g. enumeration).
    pub fn record_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }
}

/// Envelope returned to the function runtime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: ExecutionSummary,
}

impl From<ExecutionSummary> for InvocationResponse {
    fn from(body: ExecutionSummary) -> Self {
        Self {
            status_code: RESPONSE_STATUS_OK,
            body,
        }
    }
}
