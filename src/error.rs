use crate::calculators::atar::{ScoreError, TableError};
use crate::calculators::AssessmentError;
use crate::config::ConfigError;
use crate::policy::{PolicyError, PolicyYear};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Policy(PolicyError),
    UnsupportedPolicyYear(PolicyYear),
    Assessment(AssessmentError),
    ScoreTable(TableError),
    Scores(ScoreError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Json(err) => write!(f, "json error: {err}"),
            AppError::Policy(err) => write!(f, "policy table error: {err}"),
            AppError::UnsupportedPolicyYear(year) => {
                write!(f, "no built-in policy tables for {year}")
            }
            AppError::Assessment(err) => write!(f, "assessment error: {err}"),
            AppError::ScoreTable(err) => write!(f, "score table error: {err}"),
            AppError::Scores(err) => write!(f, "score input error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Policy(err) => Some(err),
            AppError::UnsupportedPolicyYear(_) => None,
            AppError::Assessment(err) => Some(err),
            AppError::ScoreTable(err) => Some(err),
            AppError::Scores(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<PolicyError> for AppError {
    fn from(value: PolicyError) -> Self {
        Self::Policy(value)
    }
}

impl From<AssessmentError> for AppError {
    fn from(value: AssessmentError) -> Self {
        Self::Assessment(value)
    }
}

impl From<TableError> for AppError {
    fn from(value: TableError) -> Self {
        Self::ScoreTable(value)
    }
}

impl From<ScoreError> for AppError {
    fn from(value: ScoreError) -> Self {
        Self::Scores(value)
    }
}
