//! Static file server for the production bundle.

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::LaunchError;

/// Router serving files under `root`; directories resolve to `index.html`.
pub fn static_router(root: &Path) -> Router {
    let serve_dir = ServeDir::new(root).append_index_html_on_directories(true);
    Router::new()
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
}

/// Binds a static server. Split from serving so callers can act between the
/// two (print the address, open a browser) knowing the port is held.
#[async_trait]
pub trait StaticHost: Send + Sync {
    async fn bind(&self, root: &Path, addr: &str) -> Result<Box<dyn BoundServer>, LaunchError>;
}

#[async_trait]
pub trait BoundServer: Send {
    fn local_addr(&self) -> SocketAddr;

    /// Serve until Ctrl+C, then drain in-flight requests and return.
    async fn serve_until_interrupt(self: Box<Self>) -> Result<(), LaunchError>;
}

/// axum-backed host.
#[derive(Debug, Clone, Copy)]
pub struct AxumHost {
    enter_root: bool,
}

impl Default for AxumHost {
    fn default() -> Self {
        Self { enter_root: true }
    }
}

impl AxumHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the process working directory. By default `bind` enters the
    /// served root.
    pub fn keep_working_dir(mut self) -> Self {
        self.enter_root = false;
        self
    }

    /// Concrete form of [`StaticHost::bind`].
    pub async fn bind_axum(&self, root: &Path, addr: &str) -> Result<AxumServer, LaunchError> {
        let root = root
            .canonicalize()
            .map_err(|source| LaunchError::EnterRoot {
                dir: root.to_path_buf(),
                source,
            })?;
        if self.enter_root {
            std::env::set_current_dir(&root).map_err(|source| LaunchError::EnterRoot {
                dir: root.clone(),
                source,
            })?;
        }
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| LaunchError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| LaunchError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        tracing::info!(%local_addr, root = %root.display(), "static server bound");
        Ok(AxumServer {
            listener,
            local_addr,
            root,
        })
    }
}

#[async_trait]
impl StaticHost for AxumHost {
    async fn bind(&self, root: &Path, addr: &str) -> Result<Box<dyn BoundServer>, LaunchError> {
        Ok(Box::new(self.bind_axum(root, addr).await?))
    }
}

pub struct AxumServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    root: PathBuf,
}

impl AxumServer {
    /// Serve until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), LaunchError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = static_router(&self.root);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(LaunchError::Serve)?;
        tracing::info!(local_addr = %self.local_addr, "static server stopped");
        Ok(())
    }
}

#[async_trait]
impl BoundServer for AxumServer {
    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn serve_until_interrupt(self: Box<Self>) -> Result<(), LaunchError> {
        let shutdown = drain_then_force(ctrl_c(), ctrl_c(), || {
            tracing::warn!("second interrupt; exiting without draining connections");
            std::process::exit(0);
        });
        (*self).serve_with_shutdown(shutdown).await
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Resolves when `first` does, which starts the graceful drain. From then on
/// `second` resolving runs `force`, so a stuck drain can still be cut short.
pub(crate) async fn drain_then_force<A, B, K>(first: A, second: B, force: K)
where
    A: Future<Output = ()>,
    B: Future<Output = ()> + Send + 'static,
    K: FnOnce() + Send + 'static,
{
    first.await;
    println!("\nShutting down... press Ctrl+C again to force exit");
    tokio::spawn(async move {
        second.await;
        force();
    });
}
