//! Idempotent database creation.
//!
//! Connect to the administrative database, check whether the target
//! exists, and issue exactly one `CREATE DATABASE` when it does not.
//! Errors are returned to the caller, never retried.

use dbops_core::naming;

use crate::error::ProvisionResult;
use crate::server::{ConnectionSettings, Connector, SqlServer};

/// What [`ensure_database`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

/// Create `name` on an already connected server unless it exists.
pub async fn ensure_database<S: SqlServer + ?Sized>(
    server: &mut S,
    name: &str,
) -> ProvisionResult<ProvisionOutcome> {
    let statement = naming::create_database_statement(name)?;

    if server.database_exists(name).await? {
        tracing::info!(database = %name, "Database already exists, skipping creation");
        return Ok(ProvisionOutcome::AlreadyExists);
    }

    tracing::info!(database = %name, "Creating database");
    server.execute_ddl(&statement).await?;
    tracing::info!(database = %name, "Database created");

    Ok(ProvisionOutcome::Created)
}

/// Validate the name, connect, and ensure the database exists.
///
/// The name is checked before any connection is attempted.
pub async fn provision<C: Connector>(
    connector: &C,
    settings: &ConnectionSettings,
    name: &str,
) -> ProvisionResult<ProvisionOutcome> {
    naming::validate_database_name(name)?;

    tracing::info!(addr = %settings.addr(), "Connecting to SQL Server");
    let mut server = connector.connect(settings).await?;

    ensure_database(&mut server, name).await
}
