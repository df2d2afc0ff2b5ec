//! Environment variable loading with alias fallback chains.

use std::env;
use std::path::Path;

use super::ConfigError;

/// Load `.env` from the current directory into the process environment.
/// Variables that are already set win. Runs at most once per process.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if let Ok(cwd) = env::current_dir() {
            load_dotenv_from_dir(&cwd);
        }
    });
}

/// Load `<dir>/.env` if present. Missing files are not an error.
pub fn load_dotenv_from_dir(dir: &Path) {
    let path = dir.join(".env");
    if !path.is_file() {
        return;
    }
    match dotenvy::from_path(&path) {
        Ok(()) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to parse .env"),
    }
}

/// Read the primary key or the first set alias; empty values count as unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// Like [`env_optional`], falling back to `default`.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env_optional(primary, aliases).unwrap_or_else(default)
}

/// Boolean variable: 0/false/no/off are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    match env_optional(primary, aliases) {
        Some(s) => parse_bool(&s),
        None => default,
    }
}

/// Port variable. Unset gives `Ok(None)`; a value that is not a valid
/// non-zero `u16` is an error naming the key.
pub fn env_port(primary: &'static str, aliases: &[&str]) -> Result<Option<u16>, ConfigError> {
    env_optional(primary, aliases)
        .map(|raw| parse_port(primary, &raw))
        .transpose()
}

pub(crate) fn parse_bool(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

pub(crate) fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigError::InvalidPort {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(" Off "));
        assert!(!parse_bool("no"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("TRIAD_PORT", "8080").unwrap(), 8080);
        assert_eq!(parse_port("TRIAD_PORT", " 5173 ").unwrap(), 5173);
        let err = parse_port("TRIAD_PORT", "0").unwrap_err();
        assert!(err.to_string().contains("TRIAD_PORT"));
        assert!(parse_port("TRIAD_PORT", "70000").is_err());
        assert!(parse_port("TRIAD_PORT", "http").is_err());
    }

    #[test]
    fn test_dotenv_loads_new_keys_without_overriding() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(".env"),
            "TRIAD_TEST_DOTENV_FRESH=from-file\nTRIAD_TEST_DOTENV_PRESET=from-file\n",
        )
        .unwrap();
        env::set_var("TRIAD_TEST_DOTENV_PRESET", "from-shell");

        load_dotenv_from_dir(tmp.path());

        assert_eq!(
            env_optional("TRIAD_TEST_DOTENV_FRESH", &[]).as_deref(),
            Some("from-file")
        );
        assert_eq!(
            env_optional("TRIAD_TEST_DOTENV_PRESET", &[]).as_deref(),
            Some("from-shell")
        );
    }

    #[test]
    fn test_dotenv_missing_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        load_dotenv_from_dir(tmp.path());
        assert_eq!(env_optional("TRIAD_TEST_DOTENV_NEVER_WRITTEN", &[]), None);
    }

    #[test]
    fn test_env_optional_unset_is_none() {
        assert_eq!(env_optional("TRIAD_TEST_SURELY_UNSET_KEY", &[]), None);
        assert_eq!(
            env_or("TRIAD_TEST_SURELY_UNSET_KEY", &[], || "fallback".to_string()),
            "fallback"
        );
    }
}
