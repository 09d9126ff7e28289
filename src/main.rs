use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xconv::core::log::init_logging;

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

impl From<Commands> for xconv::AppCommand {
    fn from(cmd: Commands) -> xconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                xconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates => xconv::AppCommand::Rates,
            Commands::History { clear } => xconv::AppCommand::History { clear },
            Commands::Stats => xconv::AppCommand::Stats,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert, e.g. 1,250.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency code to convert from
        from: String,
        /// Currency code to convert to
        to: String,
    },
    /// List the supported currencies and their rates
    Rates,
    /// Show past conversions, newest first
    History {
        /// Remove all saved conversions
        #[arg(long)]
        clear: bool,
    },
    /// Show how often each currency pair was converted
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xconv::cli::setup::setup(),
        Some(cmd) => xconv::run_command(cmd.into(), cli.config_path.as_deref()),
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
