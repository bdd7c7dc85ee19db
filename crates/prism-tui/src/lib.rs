//! Full-screen TUI for the PRISM client.
//!
//! The architecture is a small Elm loop: `update` is the pure reducer
//! (state + event -> effects), `render` is the pure view, and
//! `runtime` owns the terminal and executes effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;

use anyhow::Result;
use prism_core::config::ProjectConfig;
use prism_core::identity::{AuthGateway, CredentialCache};
pub use runtime::TuiRuntime;

/// Runs the interactive client until the user quits.
pub async fn run_interactive(config: &ProjectConfig) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("PRISM is an interactive client and requires a terminal.");
    }

    // Pre-TUI info goes to stderr (replaced by the alternate screen).
    let mut err = stderr();
    writeln!(err, "PRISM")?;
    writeln!(err, "Project: {}", config.project_id)?;
    if let Some(host) = &config.emulator_host {
        writeln!(err, "Auth emulator: {host}")?;
    }
    err.flush()?;

    let gateway = Arc::new(AuthGateway::new(config, CredentialCache::at_default_path()));
    let mut runtime = TuiRuntime::new(gateway)?;
    runtime.run()?;

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
