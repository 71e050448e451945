//! Shared configuration for Encore.
//!
//! Loads the env-driven application settings (`AppConfig`) and the YAML show
//! catalog consumed by the proximity matcher. Everything here is plain data:
//! the geo and fee crates take validated values, never env vars or files.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod shows;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use shows::{load_shows, ShowEntry, ShowStatus, ShowsFile, VenueSpec};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read shows file {path}: {source}")]
    ShowsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shows file: {0}")]
    ShowsFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
