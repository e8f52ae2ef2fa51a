//! SQL Server connection seam.
//!
//! [`SqlServer`] is the narrow surface the provisioning flow needs from a
//! connected server; [`Connector`] opens one. The tiberius-backed
//! implementations live here, and tests substitute in-memory fakes.

use std::fmt;

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::error::{ProvisionError, ProvisionResult};

/// Database the existence check and `CREATE DATABASE` run against.
pub const ADMIN_DATABASE: &str = "master";

const DATABASE_EXISTS_QUERY: &str = "SELECT COUNT(*) FROM sys.databases WHERE name = @P1";

/// Where and how to log in.
#[derive(Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl ConnectionSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Operations the provisioner runs on a connected server.
#[async_trait]
pub trait SqlServer: Send {
    /// `true` if a database called `name` exists.
    async fn database_exists(&mut self, name: &str) -> ProvisionResult<bool>;

    /// Execute a single DDL statement in autocommit mode.
    async fn execute_ddl(&mut self, statement: &str) -> ProvisionResult<()>;
}

/// Opens a [`SqlServer`] session on the administrative database.
#[async_trait]
pub trait Connector: Send + Sync {
    type Server: SqlServer;

    async fn connect(&self, settings: &ConnectionSettings) -> ProvisionResult<Self::Server>;
}

/// Connects over TDS using tiberius.
///
/// Mirrors the driver options the provisioning scripts have always used:
/// SQL authentication, no encryption, server certificate trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiberiusConnector;

#[async_trait]
impl Connector for TiberiusConnector {
    type Server = TiberiusServer;

    async fn connect(&self, settings: &ConnectionSettings) -> ProvisionResult<TiberiusServer> {
        let addr = settings.addr();
        let connect_err = |message: String| ProvisionError::Connect {
            addr: addr.clone(),
            message,
        };

        let mut config = Config::new();
        config.host(&settings.host);
        config.port(settings.port);
        config.authentication(AuthMethod::sql_server(
            &settings.username,
            &settings.password,
        ));
        config.database(ADMIN_DATABASE);
        config.encryption(EncryptionLevel::NotSupported);
        config.trust_cert();

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| connect_err(e.to_string()))?;
        tcp.set_nodelay(true)
            .map_err(|e| connect_err(e.to_string()))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| connect_err(e.to_string()))?;

        Ok(TiberiusServer { client })
    }
}

/// A logged-in tiberius client.
pub struct TiberiusServer {
    client: Client<Compat<TcpStream>>,
}

#[async_trait]
impl SqlServer for TiberiusServer {
    async fn database_exists(&mut self, name: &str) -> ProvisionResult<bool> {
        let row = self
            .client
            .query(DATABASE_EXISTS_QUERY, &[&name])
            .await
            .map_err(|e| ProvisionError::Query(e.to_string()))?
            .into_row()
            .await
            .map_err(|e| ProvisionError::Query(e.to_string()))?;

        let count = match row {
            Some(row) => row
                .try_get::<i32, _>(0)
                .map_err(|e| ProvisionError::Query(e.to_string()))?
                .unwrap_or(0),
            None => 0,
        };

        Ok(count > 0)
    }

    async fn execute_ddl(&mut self, statement: &str) -> ProvisionResult<()> {
        self.client
            .execute(statement, &[])
            .await
            .map_err(|e| ProvisionError::Create(e.to_string()))?;
        Ok(())
    }
}
