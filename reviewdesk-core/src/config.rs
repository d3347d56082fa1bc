//! Configuration management
//!
//! Layered loading: built-in defaults, then an optional TOML file, then
//! `REVIEWDESK_*` environment variables (`__` separates nested keys, e.g.
//! `REVIEWDESK_AUTH__JWT_SECRET`).

use crate::error::{ReviewdeskError, ReviewdeskResult};
use crate::logging::LoggingConfig;
use crate::types::Identity;
use ::config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Secret used when nothing else is configured. Only suitable for local development.
pub const DEFAULT_JWT_SECRET: &str = "reviewdesk-dev-secret-change-in-production";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "REVIEWDESK";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewdeskConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    /// Identities loaded into the in-memory store at startup
    pub users: Vec<Identity>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bearer credential settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for HS256 access tokens
    pub jwt_secret: String,
    /// Expected `iss` claim; not checked when unset
    pub issuer: Option<String>,
    /// Clock skew tolerated when checking `exp`
    pub leeway_secs: u64,
    /// Lifetime of issued access tokens
    pub access_token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            issuer: None,
            leeway_secs: 30,
            access_token_ttl_secs: 3600,
        }
    }
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl ReviewdeskConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> ReviewdeskResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`ReviewdeskConfig::load`], but reads variables from `env` instead
    /// of the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> ReviewdeskResult<Self> {
        let defaults = Config::try_from(&ReviewdeskConfig::default())
            .map_err(|e| config_failure("Failed to serialise defaults", "defaults", e))?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            if !path.exists() {
                return Err(ReviewdeskError::config(
                    format!("Config file not found: {}", path.display()),
                    "read_file",
                ));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins")
                .source(env),
        );

        let config: ReviewdeskConfig = builder
            .build()
            .map_err(|e| config_failure("Failed to read configuration", "build", e))?
            .try_deserialize()
            .map_err(|e| config_failure("Failed to parse configuration", "deserialize", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, without consulting the environment
    pub fn from_toml_str(content: &str) -> ReviewdeskResult<Self> {
        let defaults = Config::try_from(&ReviewdeskConfig::default())
            .map_err(|e| config_failure("Failed to serialise defaults", "defaults", e))?;

        let config: ReviewdeskConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| config_failure("Failed to read configuration", "build", e))?
            .try_deserialize()
            .map_err(|e| config_failure("Failed to parse configuration", "deserialize", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ReviewdeskResult<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ReviewdeskError::validation(
                "JWT secret must not be empty",
                "auth.jwt_secret",
            ));
        }

        if self.auth.access_token_ttl_secs == 0 {
            return Err(ReviewdeskError::validation(
                "Access token TTL must be greater than zero",
                "auth.access_token_ttl_secs",
            ));
        }

        for origin in &self.server.allowed_origins {
            if origin.trim() == "*" {
                return Err(ReviewdeskError::validation(
                    "Wildcard origin cannot be combined with credentialed CORS; list origins explicitly",
                    "server.allowed_origins",
                ));
            }
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if user.id.trim().is_empty() {
                return Err(ReviewdeskError::validation(
                    "User id must not be empty",
                    "users.id",
                ));
            }
            if !seen.insert(user.id.as_str()) {
                return Err(ReviewdeskError::validation(
                    format!("Duplicate user id: {}", user.id),
                    "users.id",
                ));
            }
        }

        Ok(())
    }
}

fn config_failure(message: &str, operation: &str, source: ConfigError) -> ReviewdeskError {
    ReviewdeskError::Config {
        message: format!("{}: {}", message, source),
        source: Some(Box::new(source)),
        context: crate::ErrorContext::new("config")
            .with_operation(operation)
            .with_suggestion("Check TOML syntax in config file"),
    }
}
