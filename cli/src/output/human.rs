//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;
use studio_common::{AgentEntry, EntryStatus, SseEvent};

use crate::application::services::registry::{DeleteOutcome, ReconcileReport, SaveOutcome};
use crate::domain::StudioConfig;
use crate::domain::agent::config_is_json;
use crate::domain::config::{ENV_API_URL, ENV_CONFIG, ENV_ROOT};
use crate::output::OutputContext;

const RESTART_HINT: &str =
    "The execution service reads the manifest at start-up. Restart it to pick up this change.";

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("studio {version}");
    }

    /// Render the agent table, sorted by name.
    pub fn render_agent_list(&self, agents: &[AgentEntry]) {
        if agents.is_empty() {
            if !self.ctx.quiet {
                println!("No agents yet. Create one: studio agents new <name>");
            }
            return;
        }

        let mut sorted: Vec<&AgentEntry> = agents.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        let width = sorted.iter().map(|a| a.name.len()).max().unwrap_or(0).max(4);

        println!(
            "  {}",
            format!("{:<width$}  {:<7}  STATUS", "NAME", "CONFIG").style(self.ctx.styles.header)
        );
        for agent in sorted {
            println!(
                "  {:<width$}  {:<7}  {}",
                agent.name,
                config_label(&agent.config),
                status_label(&agent.status)
            );
        }
    }

    /// Render one agent's files.
    pub fn render_agent(&self, agent: &AgentEntry) {
        self.ctx.header(&agent.name);
        self.ctx.kv("Path:  ", &agent.path.display().to_string());
        self.ctx.kv("Status:", &status_label(&agent.status));
        println!();
        println!("  {}", "Code:".style(self.ctx.styles.bold));
        print_indented(&agent.code);
        println!();
        println!(
            "  {} {}",
            "Config:".style(self.ctx.styles.bold),
            config_label(&agent.config).style(self.ctx.styles.dim)
        );
        print_indented(&agent.config);
    }

    pub fn render_saved(&self, outcome: &SaveOutcome, config_valid: bool) {
        if !config_valid {
            self.ctx
                .warn("Config is not valid JSON. It was saved as-is.");
        }
        self.ctx.kv("Locator:", &outcome.locator);
        if outcome.manifest_updated {
            self.ctx.info(RESTART_HINT);
        }
    }

    pub fn render_deleted(&self, outcome: &DeleteOutcome) {
        if outcome.warning.is_some() {
            self.ctx
                .info("Repair the manifest with: studio agents reconcile --apply");
        }
        self.ctx.info(RESTART_HINT);
    }

    pub fn render_reconcile(&self, report: &ReconcileReport) {
        for name in &report.skipped {
            self.ctx.warn(&format!("Invalid agent name, not registered: {name}"));
        }
        if report.drift.is_empty() {
            self.ctx.success("Manifest and agent directories are in sync");
            return;
        }
        let verb = if report.applied { "Registered" } else { "Not in manifest" };
        for name in &report.drift.missing_in_manifest {
            self.ctx.warn(&format!("{verb}: {name}"));
        }
        let verb = if report.applied { "Unregistered" } else { "No directory" };
        for name in &report.drift.dangling_in_manifest {
            self.ctx.warn(&format!("{verb}: {name}"));
        }
        if report.applied {
            self.ctx.info(RESTART_HINT);
        } else {
            self.ctx
                .info("Repair with: studio agents reconcile --apply");
        }
    }

    /// Render one stream event: its name, then pretty JSON or the raw payload.
    /// Never suppressed by `quiet`; events are the command's output.
    pub fn render_event(&self, event: &SseEvent) {
        println!("{}", event.event.style(self.ctx.styles.event));
        let body = match &event.data {
            Some(data) => serde_json::to_string_pretty(data).unwrap_or_else(|_| event.raw.clone()),
            None => event.raw.clone(),
        };
        if !body.is_empty() {
            print_indented(&body);
        }
    }

    pub fn render_run_summary(&self, name: &str, events: usize) {
        let noun = if events == 1 { "event" } else { "events" };
        self.ctx
            .success(&format!("run of '{name}' finished: {events} {noun} received"));
    }

    /// Render the effective configuration and where it came from.
    pub fn render_config(&self, config: &StudioConfig, path: &Path) {
        let source = if path.exists() { "" } else { " (not found, using defaults)" };
        println!();
        println!(
            "  {}",
            format!("Configuration ({}{source})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<22} {}", "root:", config.root.display());
        println!("  {:<22} {}", "agents_dir:", config.agents_dir);
        println!("  {:<22} {}", "manifest:", config.manifest);
        println!("  {:<22} {}", "code_file:", config.code_file);
        println!("  {:<22} {}", "config_file:", config.config_file);
        println!("  {:<22} {}", "entry_symbol:", config.entry_symbol);
        println!("  {:<22} {}", "api_url:", config.api_url);
        println!("  {:<22} {}", "connect_timeout_secs:", config.connect_timeout_secs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for key in [ENV_CONFIG, ENV_ROOT, ENV_API_URL, "NO_COLOR"] {
            println!(
                "    {:<20} {}",
                format!("{key}:"),
                std::env::var(key).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("    {line}");
    }
}

/// `json` or `invalid` for the listing's config column.
#[must_use]
pub fn config_label(config: &str) -> &'static str {
    if config_is_json(config) {
        "json"
    } else {
        "invalid"
    }
}

#[must_use]
pub fn status_label(status: &EntryStatus) -> String {
    match status {
        EntryStatus::Ok => "ok".to_string(),
        EntryStatus::Degraded { reason } => format!("degraded ({reason})"),
    }
}
