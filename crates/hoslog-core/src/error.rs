//! Error types for the trip planning library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planning operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Invalid input validation errors, rejected before simulation starts
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The trip cannot be completed with the available rule actions
    #[error("Trip cannot be scheduled: {reason}")]
    Unschedulable { reason: String },
    /// Routing provider failure (geocoding or route lookup)
    #[error("Route provider error: {message}")]
    RouteProvider { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration file parse errors
    #[error("Configuration parse error: {source}")]
    ConfigParse {
        #[from]
        source: toml::de::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an unschedulable-trip error.
    pub fn unschedulable(reason: impl Into<String>) -> Self {
        Self::Unschedulable {
            reason: reason.into(),
        }
    }

    /// Creates a route provider error.
    pub fn route_provider(message: impl Into<String>) -> Self {
        Self::RouteProvider {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to a configuration error.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context to any error type, converting to a route provider error.
    fn route_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| PlannerError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }

    fn route_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| PlannerError::RouteProvider {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = PlannerError::invalid_input("current_cycle_hours").with_reason("must be <= 70");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'current_cycle_hours': must be <= 70"
        );
    }

    #[test]
    fn test_route_context_maps_to_route_provider() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "connection timed out",
        ));
        let err = io.route_context("geocoding failed").unwrap_err();
        assert!(matches!(err, PlannerError::RouteProvider { .. }));
        assert!(err.to_string().contains("geocoding failed"));
    }
}
