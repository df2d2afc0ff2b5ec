use std::path::PathBuf;

use thiserror::Error;
use triad_core::config::{ConfigError, PythonVersion};

use crate::installer::InstallStep;

/// Errors that stop the installer.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Python {required}+ required, found {found} ({})", interpreter.display())]
    UnsupportedPython {
        found: PythonVersion,
        required: PythonVersion,
        interpreter: PathBuf,
    },

    #[error("Python {required}+ required, but neither python3 nor python was found on PATH")]
    PythonNotFound { required: PythonVersion },

    #[error("could not run {}: {source}", interpreter.display())]
    PythonProbe {
        interpreter: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read a Python version from {} (output: '{output}')", interpreter.display())]
    UnrecognizedVersion { interpreter: PathBuf, output: String },

    /// Only raised under `FailurePolicy::FailFast`.
    #[error("{step} failed: {detail}")]
    StepFailed { step: InstallStep, detail: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
