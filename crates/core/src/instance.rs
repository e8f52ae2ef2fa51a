//! Managed database instance as reported by the cloud provider.

use std::fmt;

/// Provider status value for a running instance.
pub const STATUS_AVAILABLE: &str = "available";

/// Provider status value for a stopped instance.
pub const STATUS_STOPPED: &str = "stopped";

/// Provider status value for an instance that is shutting down.
pub const STATUS_STOPPING: &str = "stopping";

/// Lifecycle status of an instance, reduced to what the stopper cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    Available,
    Stopped,
    Stopping,
    /// Any other provider status (`backing-up`, `modifying`, ...), kept verbatim.
    Other(String),
}

impl InstanceStatus {
    /// Parse the provider's status string. Unrecognised values map to
    /// [`InstanceStatus::Other`].
    pub fn from_provider(status: &str) -> Self {
        match status {
            STATUS_AVAILABLE => Self::Available,
            STATUS_STOPPED => Self::Stopped,
            STATUS_STOPPING => Self::Stopping,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => STATUS_AVAILABLE,
            Self::Stopped => STATUS_STOPPED,
            Self::Stopping => STATUS_STOPPING,
            Self::Other(raw) => raw,
        }
    }

    /// `true` when the instance is already stopped or on its way there.
    pub fn is_stopped_or_stopping(&self) -> bool {
        matches!(self, Self::Stopped | Self::Stopping)
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed database instance.
///
/// Tags are not part of the listing snapshot; they are read fresh through
/// the instance's ARN right before the stop decision.
#[derive(Debug, Clone)]
pub struct DatabaseInstance {
    /// Unique within the account and region.
    pub identifier: String,
    pub status: InstanceStatus,
    pub engine: String,
    /// Resource ARN used for tag lookups. Some emulators omit it, and an
    /// instance without one is never stopped.
    pub arn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(InstanceStatus::from_provider("available"), InstanceStatus::Available);
        assert_eq!(InstanceStatus::from_provider("stopped"), InstanceStatus::Stopped);
        assert_eq!(InstanceStatus::from_provider("stopping"), InstanceStatus::Stopping);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status = InstanceStatus::from_provider("backing-up");
        assert_eq!(status, InstanceStatus::Other("backing-up".into()));
        assert_eq!(status.to_string(), "backing-up");
        assert!(!status.is_stopped_or_stopping());
    }

    #[test]
    fn status_matching_is_exact() {
        // The provider always reports lowercase; anything else is not "available".
        assert_eq!(
            InstanceStatus::from_provider("Available"),
            InstanceStatus::Other("Available".into())
        );
    }

    #[test]
    fn stopped_and_stopping_are_already_handled() {
        assert!(InstanceStatus::Stopped.is_stopped_or_stopping());
        assert!(InstanceStatus::Stopping.is_stopped_or_stopping());
        assert!(!InstanceStatus::Available.is_stopped_or_stopping());
    }
}
