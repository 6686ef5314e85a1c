pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, config_source, default_config_path, load_config, load_config_from_str,
    resolve_config, CONFIG_ENV,
};
pub use schema::{ListenConfig, LogFormat, LoggingConfig, ServerConfig};
