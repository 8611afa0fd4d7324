//! Configuration loading for the EcoBin backend.
//!
//! Configuration is layered: an optional `config/default.toml` file, an
//! optional file named by `ECOBIN_CONFIG_FILE`, then environment overrides
//! with the `ECOBIN` prefix (`ECOBIN_SERVER__PORT=9000`). A `.env` file is
//! honored in development via `dotenv`.

pub mod models;

pub use models::{
    AppConfig, AuthConfig, DatabaseConfig, PickupConfig, ServerConfig, StorageConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;
use tracing::debug;

static DOTENV_ONCE: Once = Once::new();

/// Load `.env` once per process. Missing files are fine.
pub fn ensure_dotenv_loaded() {
    DOTENV_ONCE.call_once(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment overrides from .env");
        }
    });
}

/// Loads the application configuration.
///
/// Dependent crates call this so they do not need to know where the
/// configuration actually comes from.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let mut builder = Config::builder()
        .add_source(File::with_name("config/default").required(false));

    if let Ok(path) = std::env::var("ECOBIN_CONFIG_FILE") {
        builder = builder.add_source(File::with_name(&path).required(true));
    }

    builder
        .add_source(Environment::with_prefix("ECOBIN").separator("__"))
        .build()?
        .try_deserialize()
}
