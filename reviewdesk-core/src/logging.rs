//! Logging setup
//!
//! Structured logging through `tracing-subscriber`, configurable output format

use crate::error::{ErrorContext, ReviewdeskError, ReviewdeskResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Whether to include file and line information
    pub include_location: bool,
    /// Whether to include thread information
    pub include_thread: bool,
    /// Custom filter directives
    pub filter_directives: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            filter_directives: vec!["tower_http=info".to_string()],
        }
    }
}

impl LoggingConfig {
    /// Build the env filter. `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> ReviewdeskResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        for directive in &self.filter_directives {
            let directive = directive.parse::<Directive>().map_err(|e| ReviewdeskError::Logging {
                message: format!("Invalid filter directive '{}': {}", directive, e),
                context: ErrorContext::new("logging").with_operation("parse_directive"),
            })?;
            filter = filter.add_directive(directive);
        }

        Ok(filter)
    }
}

/// Initialize the global subscriber
pub fn init_logging(config: &LoggingConfig) -> ReviewdeskResult<()> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_ids(config.include_thread),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_ids(config.include_thread),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_thread_ids(config.include_thread),
            )
            .try_init(),
    };

    result.map_err(|e| ReviewdeskError::Logging {
        message: e.to_string(),
        context: ErrorContext::new("logging").with_operation("init"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_directives() {
        let config = LoggingConfig {
            filter_directives: vec!["reviewdesk_web=debug".to_string()],
            ..Default::default()
        };
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn test_env_filter_rejects_bad_directive() {
        let config = LoggingConfig {
            filter_directives: vec!["reviewdesk_web=notalevel".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.env_filter(),
            Err(ReviewdeskError::Logging { .. })
        ));
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }
}
