use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKSHELF_ENV";
const CONFIG_DIR_ENV: &str = "BOOKSHELF_CONFIG_DIR";
const ENV_PREFIX: &str = "BOOKSHELF";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay
    /// and `BOOKSHELF_*` variables (`__` separates nested keys).
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = parse_environment(&environment)?;

        Ok(settings)
    }
}

fn parse_environment(value: &str) -> anyhow::Result<Environment> {
    match value {
        "local" => Ok(Environment::Local),
        "staging" => Ok(Environment::Staging),
        "production" => Ok(Environment::Production),
        other => Err(anyhow!(
            "unsupported environment '{}'; expected local/staging/production",
            other
        )),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }

    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// MongoDB connection and per-operation deadlines.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_uri")]
    pub uri: String,
    #[serde(default = "DatabaseSettings::default_name")]
    pub name: String,
    #[serde(default = "DatabaseSettings::default_collection")]
    pub collection: String,
    /// Bound on establishing the initial connection.
    #[serde(default = "DatabaseSettings::default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Bound on every individual store call made while serving a request.
    #[serde(default = "DatabaseSettings::default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl DatabaseSettings {
    fn default_uri() -> String {
        "mongodb://localhost:27017".to_string()
    }

    fn default_name() -> String {
        "library_db".to_string()
    }

    fn default_collection() -> String {
        "books".to_string()
    }

    fn default_connect_timeout_ms() -> u64 {
        10_000
    }

    fn default_operation_timeout_ms() -> u64 {
        5_000
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            name: Self::default_name(),
            collection: Self::default_collection(),
            connect_timeout_ms: Self::default_connect_timeout_ms(),
            operation_timeout_ms: Self::default_operation_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "CorsSettings::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "CorsSettings::default_max_age_secs")]
    pub max_age_secs: u64,
}

impl CorsSettings {
    fn default_allowed_origins() -> Vec<String> {
        vec!["http://localhost:5173".to_string()]
    }

    fn default_max_age_secs() -> u64 {
        12 * 60 * 60
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Self::default_allowed_origins(),
            max_age_secs: Self::default_max_age_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// Default filter directive, overridden by `RUST_LOG` when set.
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn test_default_server_listens_on_8080() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_database_points_at_local_library() {
        let settings = Settings::default();
        assert_eq!(settings.database.uri, "mongodb://localhost:27017");
        assert_eq!(settings.database.name, "library_db");
        assert_eq!(settings.database.collection, "books");
        assert_eq!(settings.database.connect_timeout_ms, 10_000);
        assert_eq!(settings.database.operation_timeout_ms, 5_000);
    }

    #[test]
    fn test_default_cors_allows_vite_dev_server_for_twelve_hours() {
        let cors = CorsSettings::default();
        assert_eq!(cors.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(cors.max_age_secs, 43_200);
    }

    #[test]
    fn test_partial_sections_fill_in_defaults() {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[database]\nname = \"test_db\"\n\n[telemetry]\nlog_format = \"json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let settings: Settings = cfg.try_deserialize().unwrap();

        assert_eq!(settings.database.name, "test_db");
        assert_eq!(settings.database.collection, "books");
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        assert!(parse_environment("qa").is_err());
        assert_eq!(parse_environment("staging").unwrap(), Environment::Staging);
    }
}
