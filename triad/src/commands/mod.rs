pub mod install;
pub mod start;

use std::path::PathBuf;

use anyhow::{Context, Result};
use triad_core::config::ProjectConfig;

/// Project layout from the environment, with `--root` taking precedence.
pub fn project_config(root: Option<PathBuf>) -> Result<ProjectConfig> {
    let project = ProjectConfig::from_env().context("Resolve project layout")?;
    let project = match root {
        Some(r) => project.with_root(r),
        None => project,
    };
    project
        .into_absolute()
        .context("Resolve project root")
}
