
use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via ECOBIN_DATABASE__URL or DATABASE_URL
}

// --- Auth Config ---
// Holds token lifetimes and signing secrets. In deployments the secrets are
// loaded from env vars (ECOBIN_AUTH__ACCESS_TOKEN_SECRET etc.), never from a
// checked-in config file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    /// Access token lifetime in seconds. Short-lived.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: i64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: i64,
    /// Set the `Secure` attribute on auth cookies.
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_access_ttl() -> i64 {
    60 * 60 * 24 // 1 day
}

fn default_refresh_ttl() -> i64 {
    60 * 60 * 24 * 10 // 10 days
}

// --- Avatar Storage Config ---
// Either an HTTP upload endpoint (object-storage provider) or a local
// directory for development. When both are present the endpoint wins.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub local_dir: Option<String>,
    /// Public base URL prepended to locally stored files.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

// --- Pickup Dispatch Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PickupConfig {
    /// Search radius for nearby-bin queries, in meters.
    #[serde(default = "default_radius_m")]
    pub search_radius_m: f64,
    /// A bin qualifies for pickup once any fill level reaches this percentage.
    #[serde(default = "default_fill_threshold")]
    pub fill_threshold: i64,
}

fn default_radius_m() -> f64 {
    10_000.0
}

fn default_fill_threshold() -> i64 {
    90
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            search_radius_m: default_radius_m(),
            fill_threshold: default_fill_threshold(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pickup: PickupConfig,
}
