use crate::error::{AdminResult, BadEnvVarSnafu, ParseMaxConnectionsSnafu, ParsePortSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 15;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_ip: String,
}

impl RuntimeConfiguration {
    pub fn new() -> AdminResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::new()?),
            server_ip: var("COURSE_ADMIN_SERVER_IP")
                .unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string()),
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    pub fn new() -> AdminResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        let max_connections = match var("DB_MAX_CONNECTIONS") {
            Ok(max) => max.parse().context(ParseMaxConnectionsSnafu)?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?.parse().context(ParsePortSnafu)?,
            database: get_env_var("DB_NAME")?,
            max_connections,
        })
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }
}
