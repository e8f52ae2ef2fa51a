//! Command-line arguments for `dbops-provision`.

use clap::Parser;

use crate::server::ConnectionSettings;

/// Create a SQL Server database if it does not already exist.
#[derive(Debug, Clone, Parser)]
#[command(name = "dbops-provision", version)]
pub struct Args {
    /// SQL Server host.
    #[arg(long, env = "MSSQL_HOST")]
    pub host: String,

    /// SQL Server port.
    #[arg(long, env = "MSSQL_PORT")]
    pub port: u16,

    /// Login name.
    #[arg(long, env = "MSSQL_USERNAME")]
    pub username: String,

    /// Login password.
    #[arg(long, env = "MSSQL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Database name to create.
    #[arg(long, env = "MSSQL_DATABASE")]
    pub database: String,
}

impl Args {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("dbops-provision").chain(args.iter().copied()))
    }

    #[test]
    fn parses_all_flags() {
        let args = parse(&[
            "--host", "sql.local", "--port", "1433", "--username", "sa", "--password", "pw",
            "--database", "orders",
        ])
        .unwrap();
        assert_eq!(args.host, "sql.local");
        assert_eq!(args.port, 1433);
        assert_eq!(args.database, "orders");

        let settings = args.connection_settings();
        assert_eq!(settings.addr(), "sql.local:1433");
        assert_eq!(settings.username, "sa");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = parse(&[
            "--host", "h", "--port", "abc", "--username", "u", "--password", "p", "--database",
            "d",
        ]);
        assert!(result.is_err());
    }
}
