//! Command lines for the environment: venv creation, pip, npm.

use std::path::{Path, PathBuf};

use crate::runner::CommandSpec;

/// Written when the project has no `requirements.txt`.
pub const MANIFEST_PLACEHOLDER: &str = "# Minimal dependencies\n";

/// `<python> -m venv <venv>`
pub fn venv_command(python: &Path, venv: &Path, root: &Path) -> CommandSpec {
    CommandSpec::new(python)
        .arg("-m")
        .arg("venv")
        .arg(venv.to_string_lossy())
        .current_dir(root)
}

/// pip inside the venv: `bin/pip` on Unix, `Scripts\pip.exe` on Windows.
pub fn venv_pip(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("pip.exe")
    } else {
        venv.join("bin").join("pip")
    }
}

/// Interpreter inside the venv.
pub fn venv_python(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

/// `pip install -r <manifest>`. Falls back to `python -m pip` when the venv
/// has an interpreter but no pip launcher.
pub fn pip_install_command(venv: &Path, manifest: &Path, root: &Path) -> CommandSpec {
    let pip = venv_pip(venv);
    let python = venv_python(venv);
    let base = if !pip.exists() && python.exists() {
        CommandSpec::new(python).args(["-m", "pip"])
    } else {
        CommandSpec::new(pip)
    };
    base.arg("install")
        .arg("-r")
        .arg(manifest.to_string_lossy())
        .current_dir(root)
}

/// npm launcher name. On Windows npm is a `.cmd` shim that `CreateProcess`
/// does not resolve from a bare name.
pub fn npm_program() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

pub fn npm_install_command(root: &Path) -> CommandSpec {
    CommandSpec::new(npm_program()).arg("install").current_dir(root)
}

pub fn npm_build_command(root: &Path) -> CommandSpec {
    CommandSpec::new(npm_program())
        .args(["run", "build"])
        .current_dir(root)
}

/// `npm run dev`, the hot-reload server used by the launcher.
pub fn npm_dev_command(root: &Path) -> CommandSpec {
    CommandSpec::new(npm_program())
        .args(["run", "dev"])
        .current_dir(root)
}
