//! Configuration structs grouped by concern.
//!
//! Loaded from the environment with defaults; CLI flags are applied on top by
//! the binary through the `with_*` methods.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::env_keys::{install as install_keys, launch as launch_keys, observability as obv_keys, paths};
use super::loader::{env_bool, env_optional, env_or, env_port};
use super::ConfigError;

pub const DEFAULT_VENV_DIR: &str = "venv";
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_DEV_PORT: u16 = 5173;
pub const DEFAULT_PROD_PORT: u16 = 8080;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const MIN_PYTHON: PythonVersion = PythonVersion::new(3, 8);

/// Project layout. Relative entries are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub venv_dir: PathBuf,
    pub manifest: PathBuf,
    pub dist_dir: PathBuf,
}

impl ProjectConfig {
    /// Default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            venv_dir: PathBuf::from(DEFAULT_VENV_DIR),
            manifest: PathBuf::from(DEFAULT_REQUIREMENTS),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }

    /// Layout from `TRIAD_ROOT` / `TRIAD_VENV_DIR` / `TRIAD_REQUIREMENTS` /
    /// `TRIAD_DIST_DIR`, root defaulting to the current directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        super::loader::load_dotenv();
        let root = match env_optional(paths::TRIAD_ROOT, &[]) {
            Some(r) => PathBuf::from(r),
            None => std::env::current_dir().map_err(ConfigError::Root)?,
        };
        Ok(Self {
            root,
            venv_dir: PathBuf::from(env_or(paths::TRIAD_VENV_DIR, &[], || {
                DEFAULT_VENV_DIR.to_string()
            })),
            manifest: PathBuf::from(env_or(
                paths::TRIAD_REQUIREMENTS,
                paths::REQUIREMENTS_ALIASES,
                || DEFAULT_REQUIREMENTS.to_string(),
            )),
            dist_dir: PathBuf::from(env_or(paths::TRIAD_DIST_DIR, &[], || {
                DEFAULT_DIST_DIR.to_string()
            })),
        })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Same layout with `root` made absolute against the current directory.
    /// The path is not required to exist.
    pub fn into_absolute(self) -> Result<Self, ConfigError> {
        let root = std::path::absolute(&self.root).map_err(ConfigError::Root)?;
        Ok(Self { root, ..self })
    }

    pub fn venv_path(&self) -> PathBuf {
        self.resolve(&self.venv_dir)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.resolve(&self.manifest)
    }

    pub fn dist_path(&self) -> PathBuf {
        self.resolve(&self.dist_dir)
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        // Path::join replaces the base when `p` is absolute.
        self.root.join(p)
    }
}

/// `MAJOR.MINOR` interpreter version; patch level is ignored for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = ConfigError;

    /// Accepts `3.11`, `3.11.4`, `3.13.0rc1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPythonVersion(s.to_string());
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let minor_raw = parts.next().ok_or_else(invalid)?;
        let digits: String = minor_raw.chars().take_while(|c| c.is_ascii_digit()).collect();
        let minor = digits.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { major, minor })
    }
}

/// What the installer does when an external command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Run every step, report all failures together, succeed overall.
    #[default]
    BestEffort,
    /// Stop at the first failing step and fail overall.
    FailFast,
}

/// Installer inputs.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub project: ProjectConfig,
    /// Explicit interpreter; `None` means discover `python3`/`python` on PATH.
    pub python: Option<PathBuf>,
    pub min_python: PythonVersion,
    pub policy: FailurePolicy,
}

impl InstallConfig {
    pub fn new(project: ProjectConfig) -> Self {
        Self {
            project,
            python: None,
            min_python: MIN_PYTHON,
            policy: FailurePolicy::default(),
        }
    }

    pub fn from_env(project: ProjectConfig) -> Self {
        super::loader::load_dotenv();
        let policy = if env_bool(install_keys::TRIAD_STRICT, &[], false) {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::BestEffort
        };
        Self {
            python: env_optional(install_keys::TRIAD_PYTHON, &[]).map(PathBuf::from),
            policy,
            ..Self::new(project)
        }
    }

    pub fn with_python(mut self, python: Option<PathBuf>) -> Self {
        if python.is_some() {
            self.python = python;
        }
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Launcher mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Hot-reload dev server as a foreground child.
    Development,
    /// Static file server over the build output.
    Production,
}

impl LaunchMode {
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            LaunchMode::Development
        } else {
            LaunchMode::Production
        }
    }
}

/// Launcher inputs.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub project: ProjectConfig,
    pub mode: LaunchMode,
    pub dev_port: u16,
    pub prod_port: u16,
    pub bind_host: String,
    pub open_browser: bool,
}

impl LaunchConfig {
    pub fn new(project: ProjectConfig, mode: LaunchMode) -> Self {
        Self {
            project,
            mode,
            dev_port: DEFAULT_DEV_PORT,
            prod_port: DEFAULT_PROD_PORT,
            bind_host: DEFAULT_BIND_HOST.to_string(),
            open_browser: true,
        }
    }

    pub fn from_env(project: ProjectConfig, mode: LaunchMode) -> Result<Self, ConfigError> {
        super::loader::load_dotenv();
        let defaults = Self::new(project, mode);
        Ok(Self {
            dev_port: env_port(launch_keys::TRIAD_DEV_PORT, &[])?.unwrap_or(defaults.dev_port),
            prod_port: env_port(launch_keys::TRIAD_PORT, launch_keys::PORT_ALIASES)?
                .unwrap_or(defaults.prod_port),
            bind_host: env_or(launch_keys::TRIAD_BIND_HOST, &[], || defaults.bind_host.clone()),
            open_browser: !env_bool(launch_keys::TRIAD_NO_BROWSER, &[], false),
            ..defaults
        })
    }

    /// Address the browser is pointed at in development mode.
    pub fn dev_url(&self) -> String {
        format!("http://localhost:{}", self.dev_port)
    }

    /// Address the browser is pointed at in production mode.
    pub fn prod_url(&self) -> String {
        format!("http://localhost:{}", self.prod_port)
    }

    /// `host:port` the static server binds to.
    pub fn bind_addr(&self) -> String {
        if self.bind_host.contains(':') && !self.bind_host.starts_with('[') {
            format!("[{}]:{}", self.bind_host, self.prod_port)
        } else {
            format!("{}:{}", self.bind_host, self.prod_port)
        }
    }
}

/// Logging: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::TRIAD_QUIET, &[], false),
                log_level: env_or(obv_keys::TRIAD_LOG_LEVEL, &[], || "triad=info".to_string()),
                log_json: env_bool(obv_keys::TRIAD_LOG_JSON, &[], false),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_paths_resolve_against_root() {
        let cfg = ProjectConfig::new("/srv/app");
        assert_eq!(cfg.venv_path(), PathBuf::from("/srv/app/venv"));
        assert_eq!(cfg.manifest_path(), PathBuf::from("/srv/app/requirements.txt"));
        assert_eq!(cfg.dist_path(), PathBuf::from("/srv/app/dist"));
    }

    #[test]
    fn test_absolute_dist_is_kept() {
        let mut cfg = ProjectConfig::new("/srv/app");
        cfg.dist_dir = PathBuf::from("/var/www/build");
        assert_eq!(cfg.dist_path(), PathBuf::from("/var/www/build"));
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let cfg = ProjectConfig::new("proj").into_absolute().unwrap();
        assert!(cfg.root.is_absolute());
        assert_eq!(cfg.root, cwd.join("proj"));
        assert_eq!(cfg.venv_path(), cwd.join("proj").join("venv"));

        let already = ProjectConfig::new("/srv/app").into_absolute().unwrap();
        assert_eq!(already.root, PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_python_version_parse_and_order() {
        assert_eq!("3.11.4".parse::<PythonVersion>().unwrap(), PythonVersion::new(3, 11));
        assert_eq!("3.13.0rc1".parse::<PythonVersion>().unwrap(), PythonVersion::new(3, 13));
        assert_eq!("3.8".parse::<PythonVersion>().unwrap(), MIN_PYTHON);
        assert!("3".parse::<PythonVersion>().is_err());
        assert!("three.eight".parse::<PythonVersion>().is_err());

        assert!(PythonVersion::new(3, 7) < MIN_PYTHON);
        assert!(PythonVersion::new(3, 10) > MIN_PYTHON);
        assert!(PythonVersion::new(2, 99) < MIN_PYTHON);
    }

    #[test]
    fn test_launch_urls_and_bind_addr() {
        let cfg = LaunchConfig::new(ProjectConfig::new("."), LaunchMode::Production);
        assert_eq!(cfg.dev_url(), "http://localhost:5173");
        assert_eq!(cfg.prod_url(), "http://localhost:8080");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");

        let v6 = LaunchConfig {
            bind_host: "::1".to_string(),
            ..cfg
        };
        assert_eq!(v6.bind_addr(), "[::1]:8080");
    }

    #[test]
    fn test_launch_mode_from_flag() {
        assert_eq!(LaunchMode::from_dev_flag(true), LaunchMode::Development);
        assert_eq!(LaunchMode::from_dev_flag(false), LaunchMode::Production);
    }

    #[test]
    fn test_install_overrides() {
        let cfg = InstallConfig::new(ProjectConfig::new("."))
            .with_python(Some(PathBuf::from("/opt/py/bin/python3")))
            .with_policy(FailurePolicy::FailFast);
        assert_eq!(cfg.python.as_deref(), Some(Path::new("/opt/py/bin/python3")));
        assert_eq!(cfg.policy, FailurePolicy::FailFast);
        // None leaves an existing choice alone
        let cfg = cfg.with_python(None);
        assert!(cfg.python.is_some());
    }
}
