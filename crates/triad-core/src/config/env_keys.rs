//! Environment variable keys. All of them use the `TRIAD_` prefix.

/// Project layout
pub mod paths {
    pub const TRIAD_ROOT: &str = "TRIAD_ROOT";
    pub const TRIAD_VENV_DIR: &str = "TRIAD_VENV_DIR";
    pub const TRIAD_REQUIREMENTS: &str = "TRIAD_REQUIREMENTS";
    pub const REQUIREMENTS_ALIASES: &[&str] = &["TRIAD_MANIFEST"];
    pub const TRIAD_DIST_DIR: &str = "TRIAD_DIST_DIR";
}

/// Installer
pub mod install {
    /// Interpreter used for the version probe and `-m venv`.
    pub const TRIAD_PYTHON: &str = "TRIAD_PYTHON";
    /// "1" makes the first failing step terminal (same as `--strict`).
    pub const TRIAD_STRICT: &str = "TRIAD_STRICT";
}

/// Launcher
pub mod launch {
    pub const TRIAD_DEV_PORT: &str = "TRIAD_DEV_PORT";
    pub const TRIAD_PORT: &str = "TRIAD_PORT";
    pub const PORT_ALIASES: &[&str] = &["TRIAD_PROD_PORT"];
    pub const TRIAD_BIND_HOST: &str = "TRIAD_BIND_HOST";
    pub const TRIAD_NO_BROWSER: &str = "TRIAD_NO_BROWSER";
}

/// Logging
pub mod observability {
    pub const TRIAD_QUIET: &str = "TRIAD_QUIET";
    pub const TRIAD_LOG_LEVEL: &str = "TRIAD_LOG_LEVEL";
    pub const TRIAD_LOG_JSON: &str = "TRIAD_LOG_JSON";
}
