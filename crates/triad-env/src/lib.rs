//! Installer for the Triple Triad web app: Python venv, pip, npm, build.
//!
//! External tools run through [`runner::CommandRunner`] so the pipeline in
//! [`installer`] can be driven by a recording runner in tests.

pub mod builder;
pub mod error;
pub mod installer;
pub mod python;
pub mod runner;

pub use error::InstallError;
pub use installer::{InstallReport, InstallStep, Installer, StepOutcome, StepStatus};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, CommandStatus, SystemRunner};
