/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line (CloudWatch-friendly).
    #[default]
    Json,
    Text,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("text") {
            Self::Text
        } else {
            Self::Json
        }
    }
}

/// Stopper configuration loaded from environment variables.
///
/// Region and credentials come from the AWS SDK default provider chain
/// (`AWS_REGION`, the execution role, ...), not from here.
#[derive(Debug, Clone, Default)]
pub struct StopperConfig {
    /// Endpoint override for the RDS client, e.g. a local emulator.
    pub endpoint_url: Option<String>,
    /// Evaluate and log but never call stop.
    pub dry_run: bool,
    pub log_format: LogFormat,
}

impl StopperConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `RDS_ENDPOINT_URL` | unset   |
    /// | `DRY_RUN`          | `false` |
    /// | `LOG_FORMAT`       | `json`  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_url = lookup("RDS_ENDPOINT_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let dry_run = lookup("DRY_RUN").as_deref().is_some_and(parse_flag);

        let log_format = lookup("LOG_FORMAT")
            .as_deref()
            .map(LogFormat::parse)
            .unwrap_or_default();

        Self {
            endpoint_url,
            dry_run,
            log_format,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> StopperConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StopperConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.endpoint_url, None);
        assert!(!cfg.dry_run);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_all_variables() {
        let cfg = config(&[
            ("RDS_ENDPOINT_URL", "http://localhost:4566"),
            ("DRY_RUN", "TRUE"),
            ("LOG_FORMAT", "text"),
        ]);
        assert_eq!(cfg.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert!(cfg.dry_run);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn blank_endpoint_and_unknown_flag_values() {
        let cfg = config(&[("RDS_ENDPOINT_URL", "  "), ("DRY_RUN", "maybe")]);
        assert_eq!(cfg.endpoint_url, None);
        assert!(!cfg.dry_run);
    }
}
