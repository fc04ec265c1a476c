//! Error types for the start form, the HTTP calls and chart rendering.

use crate::config;
use std::fmt;

/// Reasons a submit attempt is rejected. `Display` yields the alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NoUserSelected,
    MalformedUserId,
    NoGymSelected,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::NoUserSelected => config::ALERT_NO_USER,
            ValidationError::MalformedUserId => config::ALERT_BAD_USER_ID,
            ValidationError::NoGymSelected => config::ALERT_NO_GYM,
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

/// Failure of one of the two API calls.
///
/// Callers of the user-list endpoint collapse every variant into an empty
/// list; the variants only exist so the log says what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Network(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "Request failed: {}", e),
            FetchError::Status(code) => write!(f, "Server answered with status {}", code),
            FetchError::Decode(e) => write!(f, "Could not decode response: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingElement(&'static str),
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingElement(id) => write!(f, "Page is missing element '#{}'", id),
            ConfigError::Malformed(e) => write!(f, "Page data is malformed: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A field the chart kind needs was not part of the payload.
    MissingField {
        chart: &'static str,
        field: &'static str,
    },
    MissingContainer(String),
    Options(String),
    Script(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::MissingField { chart, field } => {
                write!(f, "Chart '{}' needs a '{}' value", chart, field)
            }
            ChartError::MissingContainer(id) => write!(f, "No chart container '#{}'", id),
            ChartError::Options(e) => write!(f, "Could not build chart options: {}", e),
            ChartError::Script(e) => write!(f, "ApexCharts rejected the chart: {}", e),
        }
    }
}

impl std::error::Error for ChartError {}
