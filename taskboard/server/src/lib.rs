pub mod config {
    use serde::Deserialize;

    use crate::database::DatabaseSettings;

    #[derive(Deserialize, Debug)]
    pub struct Config {
        /// Full connection URL. Takes precedence over the individual `db_*` settings.
        #[serde(default)]
        pub database_url: Option<String>,
        #[serde(default = "default_db_host")]
        pub db_host: String,
        #[serde(default = "default_db_name")]
        pub db_name: String,
        #[serde(default = "default_db_user")]
        pub db_user: String,
        #[serde(default)]
        pub db_password: String,
        #[serde(default = "default_port")]
        pub port: u16,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }

        /// Returns the URL the connection provider should connect to.
        pub fn database_url(&self) -> String {
            match &self.database_url {
                Some(url) => url.clone(),
                None => DatabaseSettings {
                    host: self.db_host.clone(),
                    name: self.db_name.clone(),
                    user: self.db_user.clone(),
                    password: self.db_password.clone(),
                }
                .connection_url(),
            }
        }
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_db_host() -> String {
        "localhost".to_string()
    }

    fn default_db_name() -> String {
        "tasks".to_string()
    }

    fn default_db_user() -> String {
        "postgres".to_string()
    }

}
pub mod database;
pub mod entities;
pub mod task;
pub mod web;
