//! Mode dispatch: development (foreground dev server) or production (static
//! server over the build output).

use std::sync::Arc;

use triad_core::config::{schema::DEFAULT_DEV_PORT, LaunchConfig, LaunchMode};
use triad_env::builder;

use crate::browser::{BrowserOpener, SystemBrowser};
use crate::error::LaunchError;
use crate::server::{AxumHost, StaticHost};
use crate::supervisor::{ForegroundExit, ProcessSupervisor, TokioSupervisor};

pub struct Launcher {
    config: LaunchConfig,
    browser: Arc<dyn BrowserOpener>,
    supervisor: Arc<dyn ProcessSupervisor>,
    host: Arc<dyn StaticHost>,
}

impl Launcher {
    pub fn new(
        config: LaunchConfig,
        browser: Arc<dyn BrowserOpener>,
        supervisor: Arc<dyn ProcessSupervisor>,
        host: Arc<dyn StaticHost>,
    ) -> Self {
        Self {
            config,
            browser,
            supervisor,
            host,
        }
    }

    /// Launcher wired to the real browser, `tokio::process` and axum.
    pub fn system(config: LaunchConfig) -> Self {
        Self::new(
            config,
            Arc::new(SystemBrowser),
            Arc::new(TokioSupervisor),
            Arc::new(AxumHost::new()),
        )
    }

    pub async fn run(&self) -> Result<(), LaunchError> {
        match self.config.mode {
            LaunchMode::Development => self.run_dev().await,
            LaunchMode::Production => self.run_prod().await,
        }
    }

    async fn run_dev(&self) -> Result<(), LaunchError> {
        println!("=== Starting in DEVELOPMENT mode ===");
        println!("Using Vite dev server with hot reload...\n");

        self.open_browser(&self.config.dev_url());

        let mut spec = builder::npm_dev_command(&self.config.project.root);
        if self.config.dev_port != DEFAULT_DEV_PORT {
            spec = spec.args(["--", "--port"]).arg(self.config.dev_port.to_string());
        }
        println!("Running: {}", spec);

        match self.supervisor.run_foreground(&spec).await? {
            ForegroundExit::Exited(status) if status.success() => {}
            ForegroundExit::Exited(status) => {
                tracing::warn!(%status, "dev server exited unsuccessfully");
                eprintln!("Dev server exited with {}", status);
            }
            ForegroundExit::Interrupted => println!("\nDev server stopped."),
        }
        Ok(())
    }

    async fn run_prod(&self) -> Result<(), LaunchError> {
        println!("=== Starting Triple Triad Simulator ===");
        println!("Production mode (serving pre-built static files)\n");

        let dist = self.config.project.dist_path();
        if !dist.is_dir() {
            return Err(LaunchError::BuildOutputMissing { dist });
        }

        let bound = self.host.bind(&dist, &self.config.bind_addr()).await?;
        let url = self.config.prod_url();
        println!("Serving from: {}", dist.display());
        println!("Open {} in your browser\n", url);
        println!("Press Ctrl+C to stop\n");
        tracing::info!(addr = %bound.local_addr(), "serving build output");

        self.open_browser(&url);

        bound.serve_until_interrupt().await?;
        println!("\nServer stopped.");
        Ok(())
    }

    fn open_browser(&self, url: &str) {
        if !self.config.open_browser {
            tracing::debug!(url, "browser opening disabled");
            return;
        }
        if let Err(e) = self.browser.open(url) {
            tracing::warn!(url, error = %e, "could not open browser");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::BoundServer;
    use async_trait::async_trait;
    use std::io;
    use std::net::SocketAddr;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use triad_core::config::ProjectConfig;
    use triad_env::{CommandSpec, CommandStatus};

    #[derive(Default)]
    struct RecordingBrowser {
        urls: Mutex<Vec<String>>,
    }

    impl BrowserOpener for RecordingBrowser {
        fn open(&self, url: &str) -> io::Result<()> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct RecordingSupervisor {
        exit: ForegroundExit,
        commands: Mutex<Vec<CommandSpec>>,
    }

    impl RecordingSupervisor {
        fn new(exit: ForegroundExit) -> Self {
            Self {
                exit,
                commands: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProcessSupervisor for RecordingSupervisor {
        async fn run_foreground(&self, spec: &CommandSpec) -> Result<ForegroundExit, LaunchError> {
            self.commands.lock().unwrap().push(spec.clone());
            Ok(self.exit)
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        binds: Mutex<Vec<(PathBuf, String)>>,
    }

    struct InstantServer(SocketAddr);

    #[async_trait]
    impl BoundServer for InstantServer {
        fn local_addr(&self) -> SocketAddr {
            self.0
        }

        async fn serve_until_interrupt(self: Box<Self>) -> Result<(), LaunchError> {
            Ok(())
        }
    }

    #[async_trait]
    impl StaticHost for RecordingHost {
        async fn bind(&self, root: &Path, addr: &str) -> Result<Box<dyn BoundServer>, LaunchError> {
            self.binds
                .lock()
                .unwrap()
                .push((root.to_path_buf(), addr.to_string()));
            Ok(Box::new(InstantServer(SocketAddr::from(([127, 0, 0, 1], 8080)))))
        }
    }

    struct Harness {
        browser: Arc<RecordingBrowser>,
        supervisor: Arc<RecordingSupervisor>,
        host: Arc<RecordingHost>,
        launcher: Launcher,
    }

    fn harness(config: LaunchConfig, exit: ForegroundExit) -> Harness {
        let browser = Arc::new(RecordingBrowser::default());
        let supervisor = Arc::new(RecordingSupervisor::new(exit));
        let host = Arc::new(RecordingHost::default());
        let launcher = Launcher::new(config, browser.clone(), supervisor.clone(), host.clone());
        Harness {
            browser,
            supervisor,
            host,
            launcher,
        }
    }

    fn config(root: &Path, mode: LaunchMode) -> LaunchConfig {
        LaunchConfig::new(ProjectConfig::new(root), mode)
    }

    #[tokio::test]
    async fn test_dev_opens_dev_url_and_runs_npm_dev() {
        let tmp = tempfile::tempdir().unwrap();
        let h = harness(
            config(tmp.path(), LaunchMode::Development),
            ForegroundExit::Interrupted,
        );

        h.launcher.run().await.unwrap();

        assert_eq!(*h.browser.urls.lock().unwrap(), vec!["http://localhost:5173"]);
        let commands = h.supervisor.commands.lock().unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program, PathBuf::from(builder::npm_program()));
        assert_eq!(commands[0].args, vec!["run", "dev"]);
        assert_eq!(commands[0].cwd.as_deref(), Some(tmp.path()));
        assert!(h.host.binds.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dev_failed_exit_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let h = harness(
            config(tmp.path(), LaunchMode::Development),
            ForegroundExit::Exited(CommandStatus { code: Some(1) }),
        );
        assert!(h.launcher.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_dev_custom_port_is_forwarded() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = config(tmp.path(), LaunchMode::Development);
        cfg.dev_port = 3000;
        let h = harness(cfg, ForegroundExit::Interrupted);

        h.launcher.run().await.unwrap();

        assert_eq!(*h.browser.urls.lock().unwrap(), vec!["http://localhost:3000"]);
        let commands = h.supervisor.commands.lock().unwrap();
        assert_eq!(commands[0].args, vec!["run", "dev", "--", "--port", "3000"]);
    }

    #[tokio::test]
    async fn test_prod_without_build_output_fails_before_serving() {
        let tmp = tempfile::tempdir().unwrap();
        let h = harness(
            config(tmp.path(), LaunchMode::Production),
            ForegroundExit::Interrupted,
        );

        let err = h.launcher.run().await.unwrap_err();

        assert!(matches!(err, LaunchError::BuildOutputMissing { .. }));
        assert!(err.to_string().contains("Production build not found"));
        assert!(h.host.binds.lock().unwrap().is_empty());
        assert!(h.browser.urls.lock().unwrap().is_empty());
        assert!(h.supervisor.commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prod_serves_dist_on_prod_port() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("dist")).unwrap();
        let h = harness(
            config(tmp.path(), LaunchMode::Production),
            ForegroundExit::Interrupted,
        );

        h.launcher.run().await.unwrap();

        let binds = h.host.binds.lock().unwrap();
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].0, tmp.path().join("dist"));
        assert_eq!(binds[0].1, "0.0.0.0:8080");
        assert_eq!(*h.browser.urls.lock().unwrap(), vec!["http://localhost:8080"]);
        assert!(h.supervisor.commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_browser_can_be_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("dist")).unwrap();
        let mut cfg = config(tmp.path(), LaunchMode::Production);
        cfg.open_browser = false;
        let h = harness(cfg, ForegroundExit::Interrupted);

        h.launcher.run().await.unwrap();

        assert!(h.browser.urls.lock().unwrap().is_empty());
        assert_eq!(h.host.binds.lock().unwrap().len(), 1);
    }
}
