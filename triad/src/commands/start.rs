//! `triad start [--dev]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use triad_core::config::{LaunchConfig, LaunchMode};
use triad_launch::Launcher;

/// CLI overrides for the launcher; `None` keeps env/default values.
#[derive(Debug, Default)]
pub struct StartOptions {
    pub root: Option<PathBuf>,
    pub dev: bool,
    pub port: Option<u16>,
    pub dev_port: Option<u16>,
    pub host: Option<String>,
    pub no_browser: bool,
}

pub fn launch_config(opts: StartOptions) -> Result<LaunchConfig> {
    let project = super::project_config(opts.root)?;
    let mut config = LaunchConfig::from_env(project, LaunchMode::from_dev_flag(opts.dev))
        .context("Load launcher configuration")?;
    if let Some(p) = opts.port {
        config.prod_port = p;
    }
    if let Some(p) = opts.dev_port {
        config.dev_port = p;
    }
    if let Some(h) = opts.host {
        config.bind_host = h;
    }
    if opts.no_browser {
        config.open_browser = false;
    }
    Ok(config)
}

pub fn cmd_start(opts: StartOptions) -> Result<()> {
    let config = launch_config(opts)?;
    tracing::info!(mode = ?config.mode, root = %config.project.root.display(), "launch");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Start async runtime")?;
    rt.block_on(Launcher::system(config).run())?;
    Ok(())
}
