//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::config::{self, ProjectConfig};

mod logging;

#[derive(Parser)]
#[command(name = "prism")]
#[command(version)]
#[command(about = "PRISM terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Target a local auth emulator instead of the hosted provider
    #[arg(long, value_name = "HOST:PORT", env = config::ENV_EMULATOR_HOST)]
    emulator_host: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration (API key masked)
    Show,
    /// List the environment variables the client reads
    Vars,
    /// Show the PRISM home directory
    Home,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { command }) => run_config(&command),
        None => {
            let mut project = ProjectConfig::from_env()?;
            if cli.emulator_host.is_some() {
                project.emulator_host = cli.emulator_host;
            }

            // The TUI owns the terminal; logs go to a file.
            let _guard = logging::init()?;
            tracing::info!(project = %project.project_id, "starting PRISM client");

            prism_tui::run_interactive(&project).await
        }
    }
}

fn run_config(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let project = ProjectConfig::from_env()?;
            println!("{project}");
        }
        ConfigCommands::Vars => {
            for name in [
                config::ENV_API_KEY,
                config::ENV_AUTH_DOMAIN,
                config::ENV_PROJECT_ID,
                config::ENV_STORAGE_BUCKET,
                config::ENV_MESSAGING_SENDER_ID,
                config::ENV_APP_ID,
            ] {
                println!("{name}");
            }
            println!("{} (optional)", config::ENV_EMULATOR_HOST);
        }
        ConfigCommands::Home => {
            println!("{}", config::paths::prism_home().display());
        }
    }
    Ok(())
}
