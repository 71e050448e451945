use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application settings, parsed and validated once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub shows_path: PathBuf,

    /// Proximity radius in meters; must be one of the recognized options
    /// (274, 1609, 4828, 8047).
    pub radius_meters: u32,
    /// Shows starting within +/- this many hours of "now" are matchable.
    pub time_window_hours: i64,
    pub confidence_high: f64,
    pub confidence_medium: f64,
    pub confidence_low: f64,

    pub acquire_timeout_ms: u64,
    pub acquire_maximum_age_ms: u64,
    pub acquire_high_accuracy: bool,

    pub platform_fee_rate: Decimal,
    pub processing_fee_rate: Decimal,
    pub processing_fee_cents: u64,
    pub direct_referral_rate: Decimal,
    pub tier2_referral_rate: Decimal,
    pub min_donation_cents: u64,
    pub max_donation_cents: u64,
}
