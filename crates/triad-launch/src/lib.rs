//! Launcher for the Triple Triad web app.
//!
//! Development mode runs `npm run dev` in the foreground; production mode
//! serves the `dist/` bundle with axum. Both stop cleanly on Ctrl+C.

pub mod browser;
pub mod error;
pub mod launcher;
pub mod server;
pub mod supervisor;

pub use browser::{BrowserOpener, SystemBrowser};
pub use error::LaunchError;
pub use launcher::Launcher;
pub use server::{static_router, AxumHost, BoundServer, StaticHost};
pub use supervisor::{ForegroundExit, ProcessSupervisor, TokioSupervisor};
