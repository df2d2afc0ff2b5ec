use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Triad - install and launch the Triple Triad Simulator
#[derive(Parser, Debug)]
#[command(name = "triad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root (default: $TRIAD_ROOT or the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the Python venv, install Python and Node dependencies, build the web app
    Install {
        /// Python interpreter to check and use for the venv (default: $TRIAD_PYTHON, then python3/python on PATH)
        #[arg(long, value_name = "PATH")]
        python: Option<PathBuf>,

        /// Stop at the first failing step and exit non-zero (default: run every step, report failures)
        #[arg(long, default_value = "false")]
        strict: bool,
    },

    /// Serve the production build, or run the Vite dev server with --dev
    Start {
        /// Run in development mode (Vite dev server with hot reload)
        #[arg(long, default_value = "false")]
        dev: bool,

        /// Static server port in production mode (default: $TRIAD_PORT or 8080)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,

        /// Dev server port (default: $TRIAD_DEV_PORT or 5173)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        dev_port: Option<u16>,

        /// Bind address for the static server (default: $TRIAD_BIND_HOST or 0.0.0.0)
        #[arg(long, value_name = "ADDR")]
        host: Option<String>,

        /// Do not open a browser tab
        #[arg(long, default_value = "false")]
        no_browser: bool,
    },
}
