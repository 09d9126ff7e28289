pub mod cli;
pub mod core;
pub mod session;
pub mod store;

use anyhow::Result;
use crate::core::config::AppConfig;
use crate::session::ConversionSession;
use tracing::debug;

/// Commands that run against an open conversion session.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rates,
    History {
        clear: bool,
    },
    Stats,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut session = ConversionSession::open(&config)?;

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&mut session, &amount, &from, &to)
        }
        AppCommand::Rates => {
            cli::rates::run(session.engine().rates());
            Ok(())
        }
        AppCommand::History { clear } => {
            cli::history::run(session.history(), clear);
            Ok(())
        }
        AppCommand::Stats => {
            cli::stats::run(session.usage());
            Ok(())
        }
    }
}
