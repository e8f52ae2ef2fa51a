use dbops_core::error::CoreError;

/// Errors raised while provisioning a database.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// The requested database name failed validation.
    #[error(transparent)]
    InvalidName(#[from] CoreError),

    /// TCP connect or login to the server failed.
    #[error("Connection to {addr} failed: {message}")]
    Connect { addr: String, message: String },

    /// The existence check could not be run.
    #[error("Query failed: {0}")]
    Query(String),

    /// The `CREATE DATABASE` statement failed.
    #[error("Create failed: {0}")]
    Create(String),
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
