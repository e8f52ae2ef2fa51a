//! `dbops-provision` -- create a SQL Server database if it is missing.
//!
//! Exit code `0` when the database exists afterwards (created now or
//! already present), `1` on any failure.
//!
//! Every flag can also be supplied through the environment
//! (`MSSQL_HOST`, `MSSQL_PORT`, `MSSQL_USERNAME`, `MSSQL_PASSWORD`,
//! `MSSQL_DATABASE`); a `.env` file is honored for local runs.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dbops_provisioner::cli::Args;
use dbops_provisioner::provision::{self, ProvisionOutcome};
use dbops_provisioner::server::TiberiusConnector;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbops_provisioner=info,dbops_provision=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let settings = args.connection_settings();

    match provision::provision(&TiberiusConnector, &settings, &args.database).await {
        Ok(ProvisionOutcome::Created) => {
            tracing::info!(database = %args.database, "Provisioning complete");
            ExitCode::SUCCESS
        }
        Ok(ProvisionOutcome::AlreadyExists) => {
            tracing::info!(database = %args.database, "Nothing to do");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(database = %args.database, error = %e, "Provisioning failed");
            ExitCode::FAILURE
        }
    }
}
