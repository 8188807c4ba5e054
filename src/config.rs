use serde::Deserialize;

use crate::messages::Locale;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_poolminsize")]
    pub poolminsize: u32,
    #[serde(default = "default_poolmaxsize")]
    pub poolmaxsize: u32,
}

fn default_poolminsize() -> u32 {
    1
}

fn default_poolmaxsize() -> u32 {
    5
}

#[derive(Deserialize, Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AuthConfig {
    /// Mixed into every issued access token digest.
    pub secret: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub pg: PgConfig,
    pub redis: Option<RedisConfig>,
    pub auth: AuthConfig,
    #[serde(default)]
    pub app: AppConfig,
}

impl Config {
    /// Reads `SECTION__KEY` variables, e.g. `PG__HOST` or `APP__LOCALE`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // values stay strings; numeric fields are converted on deserialize
        let builder = config::Config::builder()
            .add_source(config::Environment::default().separator("__"));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.pg.user, self.pg.password, self.pg.host, self.pg.port, self.pg.dbname
        )
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
