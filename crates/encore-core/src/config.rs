use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var value is invalid or the combined
/// settings fail validation.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var value is invalid or the combined
/// settings fail validation.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every setting has a default; there are no required variables.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        Decimal::from_str(&raw).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ENCORE_ENV", "development"));
    let log_level = or_default("ENCORE_LOG_LEVEL", "info");
    let shows_path = PathBuf::from(or_default("ENCORE_SHOWS_PATH", "./config/shows.yaml"));

    let radius_meters = parse_u32("ENCORE_RADIUS_METERS", "274")?;
    let time_window_hours = parse_i64("ENCORE_TIME_WINDOW_HOURS", "4")?;
    let confidence_high = parse_f64("ENCORE_CONFIDENCE_HIGH", "90")?;
    let confidence_medium = parse_f64("ENCORE_CONFIDENCE_MEDIUM", "70")?;
    let confidence_low = parse_f64("ENCORE_CONFIDENCE_LOW", "50")?;

    let acquire_timeout_ms = parse_u64("ENCORE_ACQUIRE_TIMEOUT_MS", "12000")?;
    let acquire_maximum_age_ms = parse_u64("ENCORE_ACQUIRE_MAXIMUM_AGE_MS", "300000")?;
    let acquire_high_accuracy = parse_bool("ENCORE_ACQUIRE_HIGH_ACCURACY", "true")?;

    let platform_fee_rate = parse_decimal("ENCORE_PLATFORM_FEE_RATE", "0.15")?;
    let processing_fee_rate = parse_decimal("ENCORE_PROCESSING_FEE_RATE", "0.029")?;
    let processing_fee_cents = parse_u64("ENCORE_PROCESSING_FEE_CENTS", "30")?;
    let direct_referral_rate = parse_decimal("ENCORE_DIRECT_REFERRAL_RATE", "0.025")?;
    let tier2_referral_rate = parse_decimal("ENCORE_TIER2_REFERRAL_RATE", "0.025")?;
    let min_donation_cents = parse_u64("ENCORE_MIN_DONATION_CENTS", "1")?;
    let max_donation_cents = parse_u64("ENCORE_MAX_DONATION_CENTS", "500000")?;

    let config = AppConfig {
        env,
        log_level,
        shows_path,
        radius_meters,
        time_window_hours,
        confidence_high,
        confidence_medium,
        confidence_low,
        acquire_timeout_ms,
        acquire_maximum_age_ms,
        acquire_high_accuracy,
        platform_fee_rate,
        processing_fee_rate,
        processing_fee_cents,
        direct_referral_rate,
        tier2_referral_rate,
        min_donation_cents,
        max_donation_cents,
    };

    validate_app_config(&config)?;

    Ok(config)
}

/// The proximity radii the matcher recognizes, in meters.
const RECOGNIZED_RADII: [u32; 4] = [274, 1609, 4828, 8047];

fn validate_app_config(config: &AppConfig) -> Result<(), ConfigError> {
    if !RECOGNIZED_RADII.contains(&config.radius_meters) {
        return Err(ConfigError::Validation(format!(
            "ENCORE_RADIUS_METERS must be one of {RECOGNIZED_RADII:?}, got {}",
            config.radius_meters
        )));
    }

    if config.time_window_hours <= 0 {
        return Err(ConfigError::Validation(format!(
            "ENCORE_TIME_WINDOW_HOURS must be positive, got {}",
            config.time_window_hours
        )));
    }

    let (low, medium, high) = (
        config.confidence_low,
        config.confidence_medium,
        config.confidence_high,
    );
    if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || !(low < medium && medium < high)
    {
        return Err(ConfigError::Validation(format!(
            "confidence thresholds must satisfy 0 <= low < medium < high <= 100, got {low}/{medium}/{high}"
        )));
    }

    if config.acquire_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "ENCORE_ACQUIRE_TIMEOUT_MS must be positive".to_string(),
        ));
    }

    if config.min_donation_cents == 0 {
        return Err(ConfigError::Validation(
            "ENCORE_MIN_DONATION_CENTS must be at least 1".to_string(),
        ));
    }

    if config.min_donation_cents > config.max_donation_cents {
        return Err(ConfigError::Validation(format!(
            "ENCORE_MIN_DONATION_CENTS ({}) exceeds ENCORE_MAX_DONATION_CENTS ({})",
            config.min_donation_cents, config.max_donation_cents
        )));
    }

    Ok(())
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_development() {
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.shows_path.to_string_lossy(), "./config/shows.yaml");
        assert_eq!(cfg.radius_meters, 274);
        assert_eq!(cfg.time_window_hours, 4);
        assert_eq!(cfg.confidence_high, 90.0);
        assert_eq!(cfg.confidence_medium, 70.0);
        assert_eq!(cfg.confidence_low, 50.0);
        assert_eq!(cfg.acquire_timeout_ms, 12_000);
        assert_eq!(cfg.acquire_maximum_age_ms, 300_000);
        assert!(cfg.acquire_high_accuracy);
        assert_eq!(cfg.platform_fee_rate.to_string(), "0.15");
        assert_eq!(cfg.processing_fee_rate.to_string(), "0.029");
        assert_eq!(cfg.processing_fee_cents, 30);
        assert_eq!(cfg.direct_referral_rate.to_string(), "0.025");
        assert_eq!(cfg.tier2_referral_rate.to_string(), "0.025");
        assert_eq!(cfg.min_donation_cents, 1);
        assert_eq!(cfg.max_donation_cents, 500_000);
    }

    #[test]
    fn radius_meters_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_RADIUS_METERS", "1609");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.radius_meters, 1609);
    }

    #[test]
    fn radius_meters_invalid_number() {
        let mut map = HashMap::new();
        map.insert("ENCORE_RADIUS_METERS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ENCORE_RADIUS_METERS"),
            "expected InvalidEnvVar(ENCORE_RADIUS_METERS), got: {result:?}"
        );
    }

    #[test]
    fn radius_meters_unrecognized_option_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_RADIUS_METERS", "500");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("ENCORE_RADIUS_METERS")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn time_window_hours_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_TIME_WINDOW_HOURS", "12");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.time_window_hours, 12);
    }

    #[test]
    fn time_window_hours_zero_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_TIME_WINDOW_HOURS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("ENCORE_TIME_WINDOW_HOURS")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn confidence_thresholds_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_CONFIDENCE_HIGH", "95");
        map.insert("ENCORE_CONFIDENCE_MEDIUM", "75");
        map.insert("ENCORE_CONFIDENCE_LOW", "55");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.confidence_high, 95.0);
        assert_eq!(cfg.confidence_medium, 75.0);
        assert_eq!(cfg.confidence_low, 55.0);
    }

    #[test]
    fn confidence_thresholds_out_of_order_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_CONFIDENCE_MEDIUM", "95");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("confidence thresholds")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn confidence_threshold_above_100_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_CONFIDENCE_HIGH", "120");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("confidence thresholds")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn acquire_timeout_ms_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_ACQUIRE_TIMEOUT_MS", "1000");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.acquire_timeout_ms, 1000);
    }

    #[test]
    fn acquire_timeout_ms_zero_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_ACQUIRE_TIMEOUT_MS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("ENCORE_ACQUIRE_TIMEOUT_MS")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn acquire_high_accuracy_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_ACQUIRE_HIGH_ACCURACY", "false");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.acquire_high_accuracy);
    }

    #[test]
    fn acquire_high_accuracy_invalid() {
        let mut map = HashMap::new();
        map.insert("ENCORE_ACQUIRE_HIGH_ACCURACY", "yes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ENCORE_ACQUIRE_HIGH_ACCURACY"),
            "expected InvalidEnvVar(ENCORE_ACQUIRE_HIGH_ACCURACY), got: {result:?}"
        );
    }

    #[test]
    fn platform_fee_rate_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_PLATFORM_FEE_RATE", "0.20");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.platform_fee_rate.to_string(), "0.20");
    }

    #[test]
    fn platform_fee_rate_invalid() {
        let mut map = HashMap::new();
        map.insert("ENCORE_PLATFORM_FEE_RATE", "fifteen-percent");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ENCORE_PLATFORM_FEE_RATE"),
            "expected InvalidEnvVar(ENCORE_PLATFORM_FEE_RATE), got: {result:?}"
        );
    }

    #[test]
    fn min_donation_zero_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_MIN_DONATION_CENTS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("ENCORE_MIN_DONATION_CENTS")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn min_donation_above_max_rejected() {
        let mut map = HashMap::new();
        map.insert("ENCORE_MIN_DONATION_CENTS", "1000");
        map.insert("ENCORE_MAX_DONATION_CENTS", "500");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("exceeds")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn shows_path_override() {
        let mut map = HashMap::new();
        map.insert("ENCORE_SHOWS_PATH", "/etc/encore/shows.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.shows_path.to_string_lossy(), "/etc/encore/shows.yaml");
    }
}
