//! Reviewdesk Core - shared identity types and collaborator traits
//!
//! Defines the identity model, the credential/identity collaborator traits
//! used by the access layer, configuration loading and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use self::config::*;
pub use self::error::*;
pub use self::logging::*;
pub use self::traits::*;
pub use self::types::*;
