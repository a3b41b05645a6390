use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_NESTING_DEPTH, DEFAULT_MULTI_VALUED_PROPERTIES};
use crate::error::{CoreError, CoreResult};

/// Prefix of environment variables read into the settings, e.g.
/// `CALCONV__LIMITS__MAX_UPLOAD_BYTES`.
pub const ENV_PREFIX: &str = "CALCONV";

/// Default upload size limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
/// Default number of payloads accepted by one batch request.
pub const DEFAULT_MAX_BATCH_ITEMS: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub limits: LimitsConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted upload or batch body, in bytes.
    pub max_upload_bytes: u64,
    /// Largest number of payloads in one batch request.
    pub max_batch_items: u32,
}

impl LimitsConfig {
    /// ## Summary
    /// Returns the upload limit as a `usize`, saturating on narrow targets.
    #[must_use]
    pub fn max_upload_bytes_usize(&self) -> usize {
        usize::try_from(self.max_upload_bytes).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Property names whose values are split on unescaped commas.
    pub multi_valued_properties: Vec<String>,
    /// Deepest BEGIN/END nesting accepted before a document is rejected.
    pub max_depth: usize,
}

impl Settings {
    /// ## Summary
    /// Builds the configuration layer holding only the built-in defaults.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be set.
    pub fn defaults_builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("limits.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES)?
            .set_default("limits.max_batch_items", DEFAULT_MAX_BATCH_ITEMS)?
            .set_default(
                "parser.multi_valued_properties",
                DEFAULT_MULTI_VALUED_PROPERTIES.to_vec(),
            )?
            .set_default(
                "parser.max_depth",
                u64::try_from(DEFAULT_MAX_NESTING_DEPTH).unwrap_or(u64::MAX),
            )?)
    }

    /// ## Summary
    /// Returns the settings made only of built-in defaults.
    ///
    /// ## Errors
    /// Returns an error if the defaults cannot be deserialized.
    pub fn defaults() -> Result<Self> {
        Ok(Self::defaults_builder()?
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values. Variables are
    /// named `CALCONV__<SECTION>__<KEY>`; the bare `PORT` variable overrides
    /// `server.port`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Self::defaults_builder()?
            // Env file
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .convert_case(config::Case::Snake)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("parser.multi_valued_properties"),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks that the limits are usable.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if a limit or the nesting depth is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.limits.max_upload_bytes == 0 {
            return Err(CoreError::ConfigError(
                "limits.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.limits.max_batch_items == 0 {
            return Err(CoreError::ConfigError(
                "limits.max_batch_items must be greater than zero".to_string(),
            ));
        }
        if self.parser.max_depth == 0 {
            return Err(CoreError::ConfigError(
                "parser.max_depth must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
