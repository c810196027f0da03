pub mod cli;
pub mod core;

pub use crate::core::config;

use crate::core::{ExchangeRate, SessionMode};
use anyhow::Result;
use tracing::debug;

/// Overrides given on the command line for a conversion session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    pub per_user: bool,
    pub rate: Option<f64>,
}

pub enum AppCommand {
    Convert(ConvertOptions),
}

/// Combines the config file with command line overrides.
pub fn resolve_session(
    config: &config::AppConfig,
    options: &ConvertOptions,
) -> Result<(ExchangeRate, SessionMode)> {
    let mut config = config.clone();
    if let Some(rate) = options.rate {
        config.exchange.rate = rate;
    }
    if options.per_user {
        config.session.per_user = true;
    }
    Ok((config.exchange_rate()?, config.session_mode()))
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert(options) => {
            let (rate, mode) = resolve_session(&config, &options)?;
            cli::convert::run(rate, mode)?;
        }
    }
    Ok(())
}
