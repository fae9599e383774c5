//! `studio agents`: registry management subcommands.

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::registry;
use crate::domain::agent::{AGENT_TEMPLATE, CONFIG_TEMPLATE, config_is_json};
use crate::domain::error::RegistryError;

/// Agents subcommands.
#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List agents
    List,
    /// Show an agent's code and config
    Show {
        /// Agent name
        name: String,
    },
    /// Create an agent from the built-in templates
    New {
        /// Agent name
        name: String,
    },
    /// Create or overwrite an agent
    Save {
        /// Agent name
        name: String,
        /// Program source text
        #[arg(long, conflicts_with = "code_file")]
        code: Option<String>,
        /// Read program source from a file (`-` for stdin)
        #[arg(long, value_name = "PATH")]
        code_file: Option<PathBuf>,
        /// Config JSON text
        #[arg(long, conflicts_with = "config_file")]
        config: Option<String>,
        /// Read config JSON from a file
        #[arg(long, value_name = "PATH")]
        config_file: Option<PathBuf>,
    },
    /// Delete an agent and unregister it
    Delete {
        /// Agent name
        name: String,
    },
    /// Compare agent directories with the manifest
    Reconcile {
        /// Repair the manifest instead of only reporting
        #[arg(long)]
        apply: bool,
    },
}

/// Run the agents command.
///
/// # Errors
///
/// Returns the registry error of the failed operation.
pub fn run(app: &AppContext, cmd: AgentsCommand) -> Result<ExitCode> {
    match cmd {
        AgentsCommand::List => list(app),
        AgentsCommand::Show { name } => show(app, &name),
        AgentsCommand::New { name } => save(app, &name, Some(AGENT_TEMPLATE), Some(CONFIG_TEMPLATE)),
        AgentsCommand::Save {
            name,
            code,
            code_file,
            config,
            config_file,
        } => {
            let code = match (code, code_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(read_input(&path)?),
                (None, None) => None,
            };
            let config = match (config, config_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(read_input(&path)?),
                (None, None) => None,
            };
            save(app, &name, code.as_deref(), config.as_deref())
        }
        AgentsCommand::Delete { name } => delete(app, &name),
        AgentsCommand::Reconcile { apply } => reconcile(app, apply),
    }
}

fn list(app: &AppContext) -> Result<ExitCode> {
    let agents = registry::list_agents(&app.agent_store())?;
    app.renderer().render_agent_list(&agents)?;
    Ok(ExitCode::SUCCESS)
}

fn show(app: &AppContext, name: &str) -> Result<ExitCode> {
    let agents = registry::list_agents(&app.agent_store())?;
    let agent = agents
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
    app.renderer().render_agent(agent)?;
    Ok(ExitCode::SUCCESS)
}

fn save(app: &AppContext, name: &str, code: Option<&str>, config: Option<&str>) -> Result<ExitCode> {
    let outcome = registry::save_agent(
        &app.agent_store(),
        &app.manifest_store(),
        &app.reporter(),
        &app.config.entry_point(),
        name,
        code,
        config,
    )?;
    let config_valid = config.is_none_or(config_is_json);
    app.renderer().render_saved(&outcome, config_valid)?;
    Ok(ExitCode::SUCCESS)
}

fn delete(app: &AppContext, name: &str) -> Result<ExitCode> {
    let proceed =
        app.non_interactive || app.confirm(&format!("Delete agent '{name}' and its files?"), false)?;
    if !proceed {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let outcome =
        registry::delete_agent(&app.agent_store(), &app.manifest_store(), &app.reporter(), name)?;
    app.renderer().render_deleted(&outcome)?;
    Ok(ExitCode::SUCCESS)
}

fn reconcile(app: &AppContext, apply: bool) -> Result<ExitCode> {
    let report = registry::reconcile(
        &app.agent_store(),
        &app.manifest_store(),
        &app.reporter(),
        &app.config.entry_point(),
        apply,
    )?;
    app.renderer().render_reconcile(&report)?;
    // Drift without --apply exits non-zero.
    if !apply && !report.drift.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Read text from `path`, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
