//! Foreground child processes that yield to Ctrl+C.
//!
//! On interrupt the child gets one termination request (SIGTERM on Unix,
//! `TerminateProcess` elsewhere) and is then reaped. There is no timeout and
//! no escalation to SIGKILL.

use std::future::Future;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use triad_env::{CommandSpec, CommandStatus};

use crate::error::LaunchError;

/// How a foreground child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundExit {
    Exited(CommandStatus),
    Interrupted,
}

#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    /// Run `spec` with inherited stdio until it exits or the user interrupts.
    async fn run_foreground(&self, spec: &CommandSpec) -> Result<ForegroundExit, LaunchError>;
}

/// Supervisor backed by `tokio::process` and `tokio::signal::ctrl_c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSupervisor;

#[async_trait]
impl ProcessSupervisor for TokioSupervisor {
    async fn run_foreground(&self, spec: &CommandSpec) -> Result<ForegroundExit, LaunchError> {
        run_until(spec, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}

/// Run `spec` until it exits or `shutdown` resolves, whichever comes first.
pub async fn run_until<F>(spec: &CommandSpec, shutdown: F) -> Result<ForegroundExit, LaunchError>
where
    F: Future<Output = ()>,
{
    let command = spec.to_string();
    let mut child = Command::from(spec.to_command())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            command: command.clone(),
            source,
        })?;
    tracing::info!(%command, pid = ?child.id(), "foreground child started");

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|source| LaunchError::Wait { command: command.clone(), source })?;
            tracing::info!(%command, code = ?status.code(), "foreground child exited");
            Ok(ForegroundExit::Exited(CommandStatus { code: status.code() }))
        }
        _ = shutdown => {
            tracing::info!(%command, "interrupt received; asking child to terminate");
            request_termination(&mut child);
            if let Err(e) = child.wait().await {
                tracing::warn!(%command, error = %e, "failed to reap child");
            }
            Ok(ForegroundExit::Interrupted)
        }
    }
}

#[cfg(unix)]
fn request_termination(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    // id() is None once the child has been reaped
    let Some(pid) = child.id() else { return };
    if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        tracing::debug!(pid, error = %e, "SIGTERM not delivered");
    }
}

#[cfg(not(unix))]
fn request_termination(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        tracing::debug!(error = %e, "terminate request failed");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 4"]);
        let exit = run_until(&spec, std::future::pending()).await.unwrap();
        assert_eq!(exit, ForegroundExit::Exited(CommandStatus { code: Some(4) }));
    }

    #[tokio::test]
    async fn test_interrupt_terminates_child() {
        let spec = CommandSpec::new("sleep").arg("30");
        let started = Instant::now();
        let exit = run_until(&spec, tokio::time::sleep(Duration::from_millis(100)))
            .await
            .unwrap();
        assert_eq!(exit, ForegroundExit::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let spec = CommandSpec::new("triad-no-such-dev-server");
        let err = run_until(&spec, std::future::pending()).await.unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
