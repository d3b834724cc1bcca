//! Error types and handling for the Climascope client

use std::time::Duration;
use thiserror::Error;

/// Main error type for the Climascope client
///
/// Validation variants are produced locally before any network call is
/// issued; the remaining variants classify the outcome of one outbound
/// request. Callers match on the variant instead of probing optional
/// fields.
#[derive(Error, Debug)]
pub enum ClimascopeError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },

    /// Year count outside the configured bounds
    #[error("Invalid year range: {message}")]
    InvalidRange { message: String },

    /// Date string that does not reduce to a valid YYYYMMDD value
    #[error("Invalid date format: {message}")]
    InvalidDateFormat { message: String },

    /// Start date after end date
    #[error("Invalid date range: {message}")]
    InvalidDateRange { message: String },

    /// The timeout budget elapsed before the response arrived
    #[error("Request timed out after {budget_secs}s")]
    Timeout { budget_secs: u64 },

    /// Non-2xx response from the backend, with the best message available
    #[error("API error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// 2xx response whose body failed to parse as the expected structure
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// The request could not be dispatched at all
    #[error("Network unavailable: {message}")]
    NetworkUnavailable { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The request was cancelled because a newer one replaced it
    #[error("Request superseded by a newer one")]
    Superseded,
}

impl ClimascopeError {
    /// Create a new invalid-coordinate error
    pub fn invalid_coordinate<S: Into<String>>(message: S) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    /// Create a new invalid-range error
    pub fn invalid_range<S: Into<String>>(message: S) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }

    /// Create a new invalid-date-format error
    pub fn invalid_date_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidDateFormat {
            message: message.into(),
        }
    }

    /// Create a new invalid-date-range error
    pub fn invalid_date_range<S: Into<String>>(message: S) -> Self {
        Self::InvalidDateRange {
            message: message.into(),
        }
    }

    /// Create a timeout error from the budget that elapsed
    pub fn timeout(budget: Duration) -> Self {
        Self::Timeout {
            budget_secs: budget.as_secs(),
        }
    }

    /// Create a remote error from an HTTP status and message
    pub fn remote<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a network-unavailable error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::NetworkUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error was produced by local validation, before any
    /// network call was issued
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinate { .. }
                | Self::InvalidRange { .. }
                | Self::InvalidDateFormat { .. }
                | Self::InvalidDateRange { .. }
        )
    }

    /// Get a user-friendly error message for a dismissable notification
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCoordinate { message }
            | Self::InvalidRange { message }
            | Self::InvalidDateFormat { message }
            | Self::InvalidDateRange { message } => {
                format!("Invalid input: {message}")
            }
            Self::Timeout { budget_secs } => {
                format!("The analysis took longer than {budget_secs} seconds. Please try again.")
            }
            Self::Remote { message, .. } => message.clone(),
            Self::MalformedResponse { .. } => {
                "Received unexpected data from the weather service. Please try again.".to_string()
            }
            Self::NetworkUnavailable { .. } => {
                "Unable to connect to the weather service. Please check your internet connection."
                    .to_string()
            }
            Self::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            Self::Superseded => "A newer request replaced this one.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let coord_err = ClimascopeError::invalid_coordinate("latitude out of range");
        assert!(matches!(
            coord_err,
            ClimascopeError::InvalidCoordinate { .. }
        ));

        let remote_err = ClimascopeError::remote(503, "service unavailable");
        assert!(matches!(
            remote_err,
            ClimascopeError::Remote { status: 503, .. }
        ));

        let timeout_err = ClimascopeError::timeout(Duration::from_secs(30));
        assert!(matches!(
            timeout_err,
            ClimascopeError::Timeout { budget_secs: 30 }
        ));
    }

    #[test]
    fn test_validation_classification() {
        assert!(ClimascopeError::invalid_range("years out of bounds").is_validation());
        assert!(ClimascopeError::invalid_date_format("bad date").is_validation());
        assert!(!ClimascopeError::timeout(Duration::from_secs(10)).is_validation());
        assert!(!ClimascopeError::remote(500, "boom").is_validation());
    }

    #[test]
    fn test_user_messages() {
        let coord_err = ClimascopeError::invalid_coordinate("latitude must be between -90 and 90");
        assert!(coord_err.user_message().contains("Invalid input"));

        let net_err = ClimascopeError::network("connection refused");
        assert!(net_err.user_message().contains("Unable to connect"));

        let remote_err = ClimascopeError::remote(404, "No data for this location");
        assert_eq!(remote_err.user_message(), "No data for this location");
    }
}
