use anyhow::Result;
use clap::{Parser, Subcommand};
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Start an interactive conversion session (default)
    Convert {
        /// Ask for a user name before each round of conversions
        #[arg(long)]
        per_user: bool,

        /// Override the configured exchange rate (source units per target unit)
        #[arg(long)]
        rate: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(Commands::Convert { per_user, rate }) => fxconv::run_command(
            fxconv::AppCommand::Convert(fxconv::ConvertOptions { per_user, rate }),
            cli.config_path.as_deref(),
        ),
        None => fxconv::run_command(
            fxconv::AppCommand::Convert(fxconv::ConvertOptions::default()),
            cli.config_path.as_deref(),
        ),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
