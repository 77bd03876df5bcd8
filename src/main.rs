use anyhow::Result;
use clap::{Parser, Subcommand};
use efplot::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Directory holding the optimiser's results, overriding the configuration
    #[arg(short, long, global = true)]
    results_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Render the efficient frontier plot (default)
    Plot {
        /// Write the plot without opening it
        #[arg(long)]
        no_show: bool,
    },
    /// Display the highlighted portfolios as a table
    Summary,
}

impl From<Commands> for efplot::AppCommand {
    fn from(cmd: Commands) -> efplot::AppCommand {
        match cmd {
            Commands::Plot { no_show } => efplot::AppCommand::Plot { no_show },
            Commands::Summary => efplot::AppCommand::Summary,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Plot { no_show: false });
    let result = match command {
        Commands::Setup => efplot::cli::setup::setup(),
        cmd => efplot::run_command(
            cmd.into(),
            cli.config_path.as_deref(),
            cli.results_dir.as_deref(),
        ),
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "Application failed");
    }
    result
}
