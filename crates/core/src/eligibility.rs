//! Stop-eligibility policy for managed database instances.
//!
//! Pure logic -- the caller fetches tags from the provider and passes them
//! in. Rules are evaluated in order and the first match wins; an instance
//! that matches none of them may be stopped. When tags cannot be read at
//! all the caller must not stop the instance.

use std::fmt;

use crate::tags::TagSet;

pub const TAG_ENVIRONMENT: &str = "Environment";
pub const TAG_AUTO_STOP: &str = "AutoStop";
pub const TAG_PERSISTENT: &str = "Persistent";

/// Identifiers containing this marker (any case) are treated as production.
///
/// This is a plain substring test, so `unproductive-test` also matches.
pub const PRODUCTION_MARKER: &str = "prod";

/// Why an instance must not be stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    /// `Environment=production`.
    ProductionEnvironment,
    /// `AutoStop=false`.
    AutoStopDisabled,
    /// `Persistent=true`.
    Persistent,
    /// Identifier contains [`PRODUCTION_MARKER`].
    ProductionIdentifier,
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ProductionEnvironment => "tagged Environment=production",
            Self::AutoStopDisabled => "tagged AutoStop=false",
            Self::Persistent => "tagged Persistent=true",
            Self::ProductionIdentifier => "identifier looks like production",
        };
        f.write_str(text)
    }
}

/// Outcome of evaluating the policy for one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopDecision {
    Eligible,
    Ineligible(IneligibleReason),
}

impl StopDecision {
    pub fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Evaluate the policy for an instance.
pub fn evaluate(identifier: &str, tags: &TagSet) -> StopDecision {
    if tags.value_equals(TAG_ENVIRONMENT, "production") {
        return StopDecision::Ineligible(IneligibleReason::ProductionEnvironment);
    }
    if tags.value_equals(TAG_AUTO_STOP, "false") {
        return StopDecision::Ineligible(IneligibleReason::AutoStopDisabled);
    }
    if tags.value_equals(TAG_PERSISTENT, "true") {
        return StopDecision::Ineligible(IneligibleReason::Persistent);
    }
    if identifier.to_lowercase().contains(PRODUCTION_MARKER) {
        return StopDecision::Ineligible(IneligibleReason::ProductionIdentifier);
    }
    StopDecision::Eligible
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
