use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bridgiron::config::AppPaths;

mod cli;

use cli::history::HistoryAction;

#[derive(Parser)]
#[command(name = "bridgiron")]
#[command(about = "Clipboard bridge between a chat assistant and Claude Code")]
#[command(version)]
struct Cli {
    /// Settings directory (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GUI (default)
    Gui,

    /// Print the latest Claude Code report for a project
    Report {
        /// Project directory (defaults to the saved project path)
        #[arg(long)]
        project: Option<String>,

        /// Print the report without the configured prefix
        #[arg(long)]
        no_prefix: bool,
    },

    /// Print the generated bookmarklet
    Bookmarklet {
        /// Template file to use instead of the installed one
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Inspect or edit the copy history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AppPaths::resolve(cli.config_dir);
    let settings = paths.load_settings();

    // Initialize logging
    let log_level = if cli.verbose || settings.debug_mode {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Report { project, no_prefix }) => {
            cli::report::report_command(&settings, project, no_prefix)?;
        }
        Some(Commands::Bookmarklet { template }) => {
            cli::bookmarklet::bookmarklet_command(&paths, template.as_deref())?;
        }
        Some(Commands::History { action }) => {
            cli::history::history_command(&paths, action)?;
        }
        Some(Commands::Gui) | None => {
            bridgiron::gui::run_gui(paths)?;
        }
    }

    Ok(())
}
