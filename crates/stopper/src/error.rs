/// Errors from the RDS seam.
///
/// SDK errors are flattened to strings here so nothing above this layer
/// depends on SDK error types.
#[derive(Debug, thiserror::Error)]
pub enum RdsError {
    #[error("{0}")]
    Describe(String),

    #[error("{0}")]
    ListTags(String),

    #[error("{0}")]
    Stop(String),

    #[error("instance {0} has no ARN")]
    MissingArn(String),
}
