//! Triad configuration layer
//!
//! Every environment read lives here; commands receive structured config
//! values instead of calling `std::env::var` themselves.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool`, `env_port` and `.env` loading
//! - `schema`: `ProjectConfig`, `InstallConfig`, `LaunchConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, env_port, load_dotenv, load_dotenv_from_dir};
pub use schema::{
    FailurePolicy, InstallConfig, LaunchConfig, LaunchMode, ObservabilityConfig, ProjectConfig,
    PythonVersion,
};

use thiserror::Error;

/// Errors raised while assembling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: '{value}' is not a valid port number")]
    InvalidPort { key: &'static str, value: String },

    #[error("invalid Python version '{0}' (expected MAJOR.MINOR)")]
    InvalidPythonVersion(String),

    #[error("cannot determine project root: {0}")]
    Root(#[source] std::io::Error),
}
