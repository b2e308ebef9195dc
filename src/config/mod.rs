use std::env;
use std::fmt;

use crate::policy::PolicyYear;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    /// Policy year the calculators default to when none is given.
    pub policy_year: PolicyYear,
    pub telemetry: TelemetryConfig,
}

const DEFAULT_POLICY_YEAR: u16 = 2025;

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let policy_year = match env::var("APP_POLICY_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map(PolicyYear)
                .map_err(|_| ConfigError::InvalidPolicyYear { value: raw })?,
            Err(_) => PolicyYear(DEFAULT_POLICY_YEAR),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            policy_year,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPolicyYear { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPolicyYear { value } => {
                write!(f, "APP_POLICY_YEAR must be a calendar year, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
