//! Interpreter discovery and version probing.

use std::path::{Path, PathBuf};

use triad_core::config::PythonVersion;

use crate::error::InstallError;
use crate::runner::{CommandRunner, CommandSpec};

const CANDIDATES: &[&str] = &["python3", "python"];

/// First of `python3` / `python` found on PATH.
pub fn find_python() -> Option<PathBuf> {
    CANDIDATES.iter().find_map(|name| which::which(name).ok())
}

/// Pull `X.Y` out of `python --version` output ("Python 3.11.4").
pub fn parse_version_output(output: &str) -> Option<PythonVersion> {
    output
        .split_whitespace()
        .skip_while(|w| !w.eq_ignore_ascii_case("python"))
        .nth(1)
        .and_then(|v| v.parse().ok())
}

/// Run `<interpreter> --version` and parse the result. Python 2 prints the
/// version on stderr, so both streams are checked.
pub fn probe_version(
    runner: &dyn CommandRunner,
    interpreter: &Path,
) -> Result<PythonVersion, InstallError> {
    let out = runner
        .capture(&CommandSpec::new(interpreter).arg("--version"))
        .map_err(|source| InstallError::PythonProbe {
            interpreter: interpreter.to_path_buf(),
            source,
        })?;
    parse_version_output(&out.stdout)
        .or_else(|| parse_version_output(&out.stderr))
        .ok_or_else(|| InstallError::UnrecognizedVersion {
            interpreter: interpreter.to_path_buf(),
            output: format!("{}{}", out.stdout, out.stderr).trim().to_string(),
        })
}
