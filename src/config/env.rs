// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::models::{clamp_radius, RADIUS_MAX, RADIUS_MIN};
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// What to do when a single place details lookup fails mid-batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFailurePolicy {
    /// Keep the record with unavailable phone/website and report the failure
    #[default]
    Degrade,
    /// Fail the whole run
    Abort,
}

impl FromStr for DetailFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(DetailFailurePolicy::Degrade),
            "abort" => Ok(DetailFailurePolicy::Abort),
            other => Err(format!("unknown detail failure policy: {}", other)),
        }
    }
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup, then hand it to
/// the client constructor; nothing reads the environment after that
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps Platform API key
    pub google_maps_api_key: String,

    /// Geocoding endpoint
    pub geocode_url: String,

    /// Base URL for the Places endpoints (nearbysearch, details)
    pub places_base_url: String,

    /// Timeout applied to every provider call, in seconds
    pub request_timeout_secs: u64,

    /// Number of details lookups in flight at once (1 = sequential)
    pub detail_concurrency: usize,

    /// Behaviour when a details lookup fails
    pub detail_failure_policy: DetailFailurePolicy,

    /// Radius offered by the form when none is given
    pub default_radius: u32,

    /// Where the CSV export is written by default
    pub export_path: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            google_maps_api_key: String::new(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            request_timeout_secs: 10,
            detail_concurrency: 1,
            detail_failure_policy: DetailFailurePolicy::Degrade,
            default_radius: 5000,
            export_path: "commerces.csv".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        Config {
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),

            geocode_url: env::var("GEOCODE_URL").unwrap_or(defaults.geocode_url),

            places_base_url: env::var("PLACES_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.places_base_url),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),

            detail_concurrency: env::var("DETAIL_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.detail_concurrency)
                .max(1),

            detail_failure_policy: env::var("DETAIL_FAILURE_POLICY")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(policy) => Some(policy),
                    Err(e) => {
                        log::warn!("{} - falling back to degrade", e);
                        None
                    }
                })
                .unwrap_or_default(),

            default_radius: env::var("DEFAULT_RADIUS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .map(clamp_radius)
                .unwrap_or(defaults.default_radius),

            export_path: env::var("EXPORT_PATH").unwrap_or(defaults.export_path),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    /// A missing API key is only a warning: the provider answers
    /// REQUEST_DENIED and that is reported per search
    pub fn validate(&self) -> Result<(), String> {
        if self.geocode_url.is_empty() {
            return Err("GEOCODE_URL must not be empty".to_string());
        }

        if self.places_base_url.is_empty() {
            return Err("PLACES_BASE_URL must not be empty".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        if !(RADIUS_MIN..=RADIUS_MAX).contains(&self.default_radius) {
            return Err(format!(
                "DEFAULT_RADIUS must be between {} and {}",
                RADIUS_MIN, RADIUS_MAX
            ));
        }

        if self.google_maps_api_key.is_empty() {
            log::warn!("GOOGLE_MAPS_API_KEY not configured - searches will be denied");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("degrade".parse::<DetailFailurePolicy>(), Ok(DetailFailurePolicy::Degrade));
        assert_eq!(" ABORT ".parse::<DetailFailurePolicy>(), Ok(DetailFailurePolicy::Abort));
        assert!("retry".parse::<DetailFailurePolicy>().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detail_concurrency, 1);
        assert_eq!(config.export_path, "commerces.csv");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_radius() {
        let config = Config {
            default_radius: 60_000,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
