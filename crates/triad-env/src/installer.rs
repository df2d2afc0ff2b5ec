//! The install pipeline: version check, venv, manifest, pip, npm install, build.
//!
//! The interpreter check is the only unconditional abort. Failures of the
//! later steps are handled by [`FailurePolicy`]: `BestEffort` runs every step
//! and returns them all in the [`InstallReport`]; `FailFast` stops at the
//! first one.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use triad_core::config::{FailurePolicy, InstallConfig, ProjectConfig};

use crate::builder;
use crate::error::InstallError;
use crate::python;
use crate::runner::{CommandRunner, CommandSpec};

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallStep {
    CreateVenv,
    WriteManifest,
    PipInstall,
    NpmInstall,
    NpmBuild,
}

impl InstallStep {
    pub const ALL: [InstallStep; 5] = [
        InstallStep::CreateVenv,
        InstallStep::WriteManifest,
        InstallStep::PipInstall,
        InstallStep::NpmInstall,
        InstallStep::NpmBuild,
    ];

    /// Header printed before the step runs.
    fn banner(self) -> &'static str {
        match self {
            InstallStep::CreateVenv => "Creating Python virtual environment...",
            InstallStep::WriteManifest => "Checking dependency manifest...",
            InstallStep::PipInstall => "Installing Python dependencies...",
            InstallStep::NpmInstall => "Installing Node.js dependencies...",
            InstallStep::NpmBuild => "Building production version...",
        }
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStep::CreateVenv => "create venv",
            InstallStep::WriteManifest => "write manifest",
            InstallStep::PipInstall => "pip install",
            InstallStep::NpmInstall => "npm install",
            InstallStep::NpmBuild => "npm run build",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: InstallStep,
    pub status: StepStatus,
}

/// Outcome of every step that ran.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub steps: Vec<StepOutcome>,
}

impl InstallReport {
    /// Failed steps with their error text.
    pub fn failures(&self) -> Vec<(InstallStep, &str)> {
        self.steps
            .iter()
            .filter_map(|o| match o.status {
                StepStatus::Failed(ref detail) => Some((o.step, detail.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn status_of(&self, step: InstallStep) -> Option<&StepStatus> {
        self.steps.iter().find(|o| o.step == step).map(|o| &o.status)
    }
}

pub struct Installer {
    config: InstallConfig,
}

impl Installer {
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline.
    ///
    /// Errors: the interpreter is missing or older than the minimum (nothing
    /// else is touched), or a step failed under `FailFast`.
    pub fn run(&self, runner: &dyn CommandRunner) -> Result<InstallReport, InstallError> {
        let python = self.check_python(runner)?;
        // Children run with cwd = root, so every path handed to them must be
        // absolute or it gets resolved under root a second time.
        let project = self.config.project.clone().into_absolute()?;

        let mut report = InstallReport::default();
        for step in InstallStep::ALL {
            let status = run_step(step, &project, runner, &python);
            match status {
                StepStatus::Done => tracing::info!(%step, "step done"),
                StepStatus::Skipped(ref why) => tracing::info!(%step, reason = %why, "step skipped"),
                StepStatus::Failed(ref detail) => {
                    tracing::warn!(%step, error = %detail, "step failed");
                    eprintln!("Error running {}: {}", step, detail);
                    if self.config.policy == FailurePolicy::FailFast {
                        return Err(InstallError::StepFailed {
                            step,
                            detail: detail.clone(),
                        });
                    }
                }
            }
            report.steps.push(StepOutcome { step, status });
        }
        Ok(report)
    }

    /// Resolve and probe the interpreter; the returned path is used for `-m venv`.
    fn check_python(&self, runner: &dyn CommandRunner) -> Result<PathBuf, InstallError> {
        let required = self.config.min_python;
        let interpreter = match self.config.python {
            Some(ref p) => p.clone(),
            None => python::find_python().ok_or(InstallError::PythonNotFound { required })?,
        };
        let found = python::probe_version(runner, &interpreter)?;
        if found < required {
            return Err(InstallError::UnsupportedPython {
                found,
                required,
                interpreter,
            });
        }
        tracing::info!(interpreter = %interpreter.display(), version = %found, "python ok");
        Ok(interpreter)
    }
}

fn run_step(
    step: InstallStep,
    project: &ProjectConfig,
    runner: &dyn CommandRunner,
    python: &Path,
) -> StepStatus {
    let root = project.root.as_path();
    match step {
        InstallStep::CreateVenv => {
            let venv = project.venv_path();
            if venv.exists() {
                return StepStatus::Skipped(format!("{} already exists", venv.display()));
            }
            println!("{}", step.banner());
            if let Err(e) = fs::create_dir_all(&venv) {
                return StepStatus::Failed(format!("create {}: {}", venv.display(), e));
            }
            let status = run_command(runner, &builder::venv_command(python, &venv, root));
            if matches!(status, StepStatus::Failed(_)) {
                // A leftover directory would make the next run skip this step.
                if let Err(e) = fs::remove_dir_all(&venv) {
                    tracing::warn!(venv = %venv.display(), error = %e, "could not remove failed venv");
                }
            }
            status
        }
        InstallStep::WriteManifest => {
            let manifest = project.manifest_path();
            if manifest.exists() {
                return StepStatus::Skipped(format!("{} already exists", manifest.display()));
            }
            match fs::write(&manifest, builder::MANIFEST_PLACEHOLDER) {
                Ok(()) => {
                    println!("Created {}", manifest.display());
                    StepStatus::Done
                }
                Err(e) => StepStatus::Failed(format!("write {}: {}", manifest.display(), e)),
            }
        }
        InstallStep::PipInstall => {
            println!("\n{}", step.banner());
            let spec = builder::pip_install_command(
                &project.venv_path(),
                &project.manifest_path(),
                root,
            );
            run_command(runner, &spec)
        }
        InstallStep::NpmInstall => {
            println!("\n{}", step.banner());
            run_command(runner, &builder::npm_install_command(root))
        }
        InstallStep::NpmBuild => {
            println!("\n{}", step.banner());
            run_command(runner, &builder::npm_build_command(root))
        }
    }
}

fn run_command(runner: &dyn CommandRunner, spec: &CommandSpec) -> StepStatus {
    println!("Running: {}", spec);
    match runner.run(spec) {
        Ok(status) if status.success() => StepStatus::Done,
        Ok(status) => StepStatus::Failed(format!("'{}' returned {}", spec, status)),
        Err(e) => StepStatus::Failed(format!("'{}' could not start: {}", spec, e)),
    }
}
