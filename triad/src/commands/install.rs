//! `triad install`

use std::path::PathBuf;

use anyhow::{Context, Result};
use triad_core::config::{FailurePolicy, InstallConfig};
use triad_env::{InstallReport, Installer, SystemRunner};

pub fn cmd_install(root: Option<PathBuf>, python: Option<PathBuf>, strict: bool) -> Result<()> {
    let project = super::project_config(root)?;
    let mut config = InstallConfig::from_env(project).with_python(python);
    if strict {
        config = config.with_policy(FailurePolicy::FailFast);
    }

    println!("=== Installing Triple Triad Simulator ===\n");
    tracing::info!(root = %config.project.root.display(), policy = ?config.policy, "install started");

    let report = Installer::new(config)
        .run(&SystemRunner)
        .context("Installation aborted")?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &InstallReport) {
    let failures = report.failures();
    if failures.is_empty() {
        println!("\n✓ Installation complete!");
        println!("  Run 'triad start' to serve the app, or 'triad start --dev' for the dev server");
        return;
    }
    println!(
        "\n⚠ Installation finished with {} failed step(s):",
        failures.len()
    );
    for (step, detail) in &failures {
        println!("  ✗ {}: {}", step, detail);
    }
    println!("  Fix the errors above and run 'triad install' again (use --strict to stop at the first failure)");
}
