//! Core identity types shared across the access layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege level of an identity.
///
/// Persisted records carry the role as an optional string: `"manager"`,
/// `"support"`, or nothing at all for ordinary users. Stored values outside
/// that set are read as [`Role::Standard`], so they never grant anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Role {
    /// Ordinary authenticated (or anonymous) user without elevated rights
    #[default]
    Standard,
    /// Full back-office operator
    Manager,
    /// Customer support operator
    Support,
}

impl Role {
    /// Read a role from its persisted form.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("manager") => Role::Manager,
            Some("support") => Role::Support,
            Some(other) if !other.is_empty() => {
                tracing::debug!(role = other, "Unrecognised stored role, treating as standard");
                Role::Standard
            }
            _ => Role::Standard,
        }
    }

    /// Persisted form of the role (`None` for standard users)
    pub fn as_stored(&self) -> Option<&'static str> {
        match self {
            Role::Standard => None,
            Role::Manager => Some("manager"),
            Role::Support => Some("support"),
        }
    }
}

impl From<Option<String>> for Role {
    fn from(value: Option<String>) -> Self {
        Role::from_stored(value.as_deref())
    }
}

impl From<Role> for Option<String> {
    fn from(role: Role) -> Self {
        role.as_stored().map(str::to_string)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Standard => write!(f, "standard"),
            Role::Manager => write!(f, "manager"),
            Role::Support => write!(f, "support"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    /// Strict parsing for user input; unknown names are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Role::Standard),
            "manager" => Ok(Role::Manager),
            "support" => Ok(Role::Support),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// The acting principal of a request, as persisted at request time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier (the token subject)
    pub id: String,
    /// Privilege level
    #[serde(default)]
    pub role: Role,
    /// Whether the account has been banned
    #[serde(default)]
    pub banned: bool,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    /// Create a non-banned identity with the given role
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            banned: false,
            email: None,
            display_name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn banned(mut self, banned: bool) -> Self {
        self.banned = banned;
        self
    }

    /// Short description for log lines
    pub fn display_string(&self) -> String {
        match &self.display_name {
            Some(name) => format!("{} ({})", name, self.role),
            None => format!("{} ({})", self.id, self.role),
        }
    }
}
