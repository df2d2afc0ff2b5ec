use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Production build not found at {}. Run 'triad install' first.", dist.display())]
    BuildOutputMissing { dist: PathBuf },

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot enter {}: {source}", dir.display())]
    EnterRoot {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("static server stopped with an error: {0}")]
    Serve(#[source] io::Error),
}
