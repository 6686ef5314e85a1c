use std::path::{Path, PathBuf};

use crate::config::schema::{LogFormat, ServerConfig};
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/config-v1.json");

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PRINTSHOP_CONFIG";

const HOST_ENV: &str = "PRINTSHOP_HOST";
const PORT_ENV: &str = "PRINTSHOP_PORT";
const LOG_LEVEL_ENV: &str = "PRINTSHOP_LOG_LEVEL";
const LOG_FORMAT_ENV: &str = "PRINTSHOP_LOG_FORMAT";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ServerConfig, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: ServerConfig = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// `<platform config dir>/printshop/config.json`, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("printshop").join("config.json"))
}

/// The config file `resolve_config` reads, if any.
///
/// Looks at `explicit`, then `PRINTSHOP_CONFIG`, then the default path if the
/// file exists.
pub fn config_source(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(|| default_config_path().filter(|p| p.is_file()))
}

/// Loads the effective configuration from [`config_source`], falling back to
/// built-in defaults. Environment overrides are applied last.
///
/// Runs before logging is initialised, so it logs nothing itself.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut config = match config_source(explicit) {
        Some(path) => load_config(&path)?,
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Overrides config fields from `PRINTSHOP_*` variables found through `lookup`.
pub fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(HOST_ENV) {
        config.server.host = host;
    }

    if let Some(port) = lookup(PORT_ENV) {
        config.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
            key: PORT_ENV.to_string(),
            reason: format!("{}", e),
        })?;
    }

    if let Some(level) = lookup(LOG_LEVEL_ENV) {
        config.logging.level = level.trim().to_lowercase();
    }

    if let Some(format) = lookup(LOG_FORMAT_ENV) {
        config.logging.format =
            format
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::InvalidEnv {
                    key: LOG_FORMAT_ENV.to_string(),
                    reason,
                })?;
    }

    Ok(())
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.server.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "Server host must not be empty".to_string(),
        });
    }

    if config.server.port == 0 {
        return Err(ConfigError::Validation {
            message: "Server port must be between 1 and 65535".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::Validation {
            message: format!(
                "Unknown log level '{}', expected one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    Ok(())
}
