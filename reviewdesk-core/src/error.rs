//! Unified error handling
//!
//! Structured error types with context and recovery suggestions, plus the
//! narrow error types returned by the credential and identity collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type ReviewdeskResult<T> = Result<T, ReviewdeskError>;

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

/// Main error type for Reviewdesk
#[derive(Error, Debug)]
pub enum ReviewdeskError {
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

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Logging setup error: {message}")]
    Logging {
        message: String,
        context: ErrorContext,
    },
}

impl ReviewdeskError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ReviewdeskError::Config { context, .. } => Some(context),
            ReviewdeskError::Validation { context, .. } => Some(context),
            ReviewdeskError::Logging { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Build a configuration error
    pub fn config(message: impl Into<String>, operation: &str) -> Self {
        ReviewdeskError::Config {
            message: message.into(),
            source: None,
            context: ErrorContext::new("config")
                .with_operation(operation)
                .with_suggestion("Check your configuration file and REVIEWDESK_* variables"),
        }
    }

    /// Build a validation error for a named field
    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        ReviewdeskError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            context: ErrorContext::new("config").with_suggestion("Check the field value and format"),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            ReviewdeskError::Config { .. } | ReviewdeskError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or validation error"
                );
            }
            ReviewdeskError::Store(_) => {
                warn!(error = %self, "Storage error (may be transient)");
            }
            ReviewdeskError::Logging { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Logging setup error"
                );
            }
        }
    }
}

/// Reasons a bearer credential fails verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token expired")]
    Expired,
    #[error("Token rejected: {0}")]
    Rejected(String),
}

/// Failures of the identity store itself (distinct from "not found")
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
    #[error("Identity store query failed: {0}")]
    Query(String),
}
