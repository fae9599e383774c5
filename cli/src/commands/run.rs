//! `studio run`: trial-run an agent against the execution service and print
//! its event stream as it arrives.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use studio_common::RunRequest;

use crate::app::AppContext;
use crate::application::services::test_run;
use crate::commands::agents::read_input;
use crate::output::progress;

/// Input sent when neither `--input` nor `--input-file` is given.
pub const DEFAULT_INPUT: &str = r#"{"messages":[{"role":"human","content":"Hello!"}]}"#;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Agent (assistant) name registered with the execution service
    pub name: String,

    /// Run input as JSON
    #[arg(long, conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read run input JSON from a file (`-` for stdin)
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,
}

/// Entry point for `studio run`.
///
/// # Errors
///
/// Returns an error if the input is not JSON, the service rejects the run or
/// cannot be reached, or the stream fails part-way. Events received before a
/// mid-stream failure are printed first.
pub async fn run(app: &AppContext, args: RunArgs) -> Result<ExitCode> {
    let input = parse_input(&args)?;
    let request = RunRequest::new(args.name.clone(), input);
    let client = app.run_client()?;
    let renderer = app.renderer();

    let spinner = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner(&format!("waiting for '{}'...", args.name)));

    let mut render_error = None;
    let mut on_event = |event: &studio_common::SseEvent| {
        if let Some(pb) = &spinner
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
        if render_error.is_none()
            && let Err(e) = renderer.render_event(event)
        {
            render_error = Some(e);
        }
    };

    let result = test_run::run_agent(&client, &request, &mut on_event).await;
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let outcome = result.with_context(|| format!("cannot start run of '{}'", args.name))?;
    if let Some(e) = render_error {
        return Err(e);
    }

    if let Some(err) = outcome.error {
        let received = outcome.events.len();
        return Err(anyhow::Error::from(err)
            .context(format!("run of '{}' interrupted after {received} events", args.name)));
    }

    renderer.render_run_summary(&args.name, outcome.events.len());
    Ok(ExitCode::SUCCESS)
}

fn parse_input(args: &RunArgs) -> Result<Value> {
    let (text, source) = match (&args.input, &args.input_file) {
        (Some(text), _) => (text.clone(), "--input".to_string()),
        (None, Some(path)) => (read_input(path)?, path.display().to_string()),
        (None, None) => (DEFAULT_INPUT.to_string(), "default input".to_string()),
    };
    serde_json::from_str(&text).with_context(|| format!("{source} is not valid JSON"))
}
