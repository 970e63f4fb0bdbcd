//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type StrataResult<T> = Result<T, StrataError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the Strata client
#[derive(Error, Debug)]
pub enum StrataError {
    /// A token could not be decoded, is expired, or was rejected by the backend
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        context: ErrorContext,
    },

    /// Login or signup rejected by the backend; the message is safe to show
    /// to the user as-is
    #[error("{message}")]
    Credentials {
        message: String,
        context: ErrorContext,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("Resource not found: {resource}")]
    NotFound {
        resource: String,
        context: ErrorContext,
    },

    /// Non-credential remote API failure (the backend answered with an error)
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },
}

impl StrataError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            StrataError::Authentication { context, .. } => Some(context),
            StrataError::Credentials { context, .. } => Some(context),
            StrataError::Network { context, .. } => Some(context),
            StrataError::Storage { context, .. } => Some(context),
            StrataError::Config { context, .. } => Some(context),
            StrataError::Validation { context, .. } => Some(context),
            StrataError::NotFound { context, .. } => Some(context),
            StrataError::Api { context, .. } => Some(context),
            StrataError::Internal { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Check if error is recoverable by retrying later
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StrataError::Network { .. } | StrataError::Api { .. })
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            StrataError::Network { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Network error (may be recoverable)"
                );
            }
            StrataError::Credentials { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Credentials rejected"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S, component: &str) -> Self {
        Self::Authentication {
            message: message.into(),
            context: ErrorContext::new(component),
        }
    }

    /// Create a credentials-rejected error
    pub fn credentials<S: Into<String>>(message: S, component: &str) -> Self {
        Self::Credentials {
            message: message.into(),
            context: ErrorContext::new(component),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        component: &str,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source,
            context: ErrorContext::new(component)
                .with_suggestion("Check network connectivity and API status"),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        component: &str,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source,
            context: ErrorContext::new(component),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(
        message: S,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        component: &str,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            context: ErrorContext::new(component).with_suggestion("Check your configuration file"),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S, field: Option<&str>, component: &str) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(|f| f.to_string()),
            context: ErrorContext::new(component)
                .with_suggestion("Check the field value and format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_display_is_the_bare_message() {
        let err = StrataError::credentials("Invalid email or password.", "test");
        assert_eq!(err.to_string(), "Invalid email or password.");
    }

    #[test]
    fn network_errors_are_recoverable() {
        let err = StrataError::network("connection refused", None, "test");
        assert!(err.is_recoverable());
        assert!(!StrataError::authentication("bad token", "test").is_recoverable());
    }

    #[test]
    fn context_carries_component_and_operation() {
        let err = StrataError::Api {
            message: "HTTP 500 error".to_string(),
            status: Some(500),
            context: ErrorContext::new("api_client").with_operation("answer_query"),
        };
        let context = err.context().unwrap();
        assert_eq!(context.component, "api_client");
        assert_eq!(context.operation.as_deref(), Some("answer_query"));
    }
}
