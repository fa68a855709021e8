use serde::Deserialize;

use crate::error::AppError;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_jwt_expiry_hours() -> i64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_max_upload_kb() -> u64 {
    10 * 1024
}

fn default_bulk_download_delay_ms() -> u64 {
    500
}

fn default_environment() -> String {
    "development".to_string()
}

/// Service configuration, loaded from environment variables (upper-cased
/// field names). A `.env` file is honored in development via dotenvy.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the JSON collections (records, users, agents).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Upload size cap per file, in kilobytes.
    #[serde(default = "default_max_upload_kb")]
    pub max_upload_kb: u64,

    /// Pause between successive items in a bulk download, in milliseconds.
    #[serde(default = "default_bulk_download_delay_ms")]
    pub bulk_download_delay_ms: u64,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let config: Config = envy::from_env()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))?;
        if config.jwt_secret.len() < 32 {
            return Err(AppError::Internal(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
