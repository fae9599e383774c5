//! `studio config`: show the effective configuration.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,
    /// Print the config file path
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if JSON rendering fails.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => {
            app.renderer().render_config(&app.config, &app.config_path)?;
        }
        ConfigCommand::Path => {
            app.renderer().render_config_path(&app.config_path)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
