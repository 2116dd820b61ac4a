use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::OnceCell;

use crate::task::TaskError;

/// Host and credentials used to reach the task database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseSettings {
    /// Builds a PostgreSQL connection URL, percent-encoding the credentials.
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.name
        )
    }
}

/// Lazily opens one database connection and hands out references to it.
///
/// The provider is owned by the application state and passed to whoever needs
/// storage. The first successful connect is cached; a failed connect caches
/// nothing, so the next caller starts from scratch.
pub struct ConnectionProvider {
    options: ConnectOptions,
    connection: OnceCell<DatabaseConnection>,
}

impl ConnectionProvider {
    pub fn new(options: ConnectOptions) -> Self {
        Self {
            options,
            connection: OnceCell::new(),
        }
    }

    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self::new(ConnectOptions::new(settings.connection_url()))
    }

    /// Wraps a connection that is already open.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        let options = ConnectOptions::new(String::new());
        Self {
            options,
            connection: OnceCell::new_with(Some(connection)),
        }
    }

    /// Returns the shared connection, connecting on first use.
    #[tracing::instrument(skip(self))]
    pub async fn connection(&self) -> Result<&DatabaseConnection, TaskError> {
        self.connection
            .get_or_try_init(|| async {
                tracing::info!("Opening database connection");
                Database::connect(self.options.clone()).await.map_err(|err| {
                    tracing::error!("Failed to connect to the database: {}", err);
                    TaskError::ConnectionFailure(err)
                })
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("connected", &self.is_connected())
            .finish()
    }
}
