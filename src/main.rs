use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tripfx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Skip rate providers and use cached or built-in rates
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tripfx::AppCommand {
    fn from(cmd: Commands) -> tripfx::AppCommand {
        match cmd {
            Commands::Rates { base } => tripfx::AppCommand::Rates { base },
            Commands::Convert { amount, from, to } => {
                tripfx::AppCommand::Convert { amount, from, to }
            }
            Commands::Defaults => tripfx::AppCommand::Defaults,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display exchange rates for a base currency
    Rates {
        /// Base currency code, e.g. usd
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    /// Display the built-in fallback rates
    Defaults,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tripfx::cli::setup::setup(),
        Some(cmd) => {
            tripfx::run_command(cmd.into(), cli.config_path.as_deref(), cli.offline).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
