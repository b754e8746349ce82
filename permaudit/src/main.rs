use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use claude_settings::{Settings, SettingsLoader};
use permaudit::errors::display_error;
use permaudit::extract::PatternExtractor;
use permaudit::render;
use permaudit::report::{ReportOptions, generate_fetch_report, generate_report};
use permaudit::scanner::{ScanOutcome, scan_sessions};
use serde::Serialize;
use tracing::{Level, error, info, instrument};

mod cli;
mod tracing_init;

use cli::{AuditArgs, Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    tracing_init::init_tracing(cli.verbose);
    info!(args = ?std::env::args(), "permaudit started");

    let result = match &cli.command {
        Commands::Tools(args) => run_tools(args),
        Commands::Fetch(args) => run_fetch(args),
    };

    if let Err(e) = result {
        error!(cmd = ?cli.command, "Audit failed: {e:#}");
        display_error(&e, cli.verbose);
        std::process::exit(1);
    }
}

/// Everything a report is generated from.
struct AuditInput {
    settings: Settings,
    scan: ScanOutcome,
    options: ReportOptions,
}

#[instrument(level = Level::TRACE)]
fn load_input(args: &AuditArgs) -> Result<AuditInput> {
    let loader = SettingsLoader::default();
    let settings = loader
        .load(&args.settings_source())
        .with_context(|| format!("failed to load {} settings", args.settings_label()))?;

    let projects_dir = args
        .resolve_projects_dir(loader.resolver())
        .context("failed to locate session logs")?;
    let scan = scan_sessions(&projects_dir, args.days, Utc::now())
        .with_context(|| format!("failed to scan session logs in {}", projects_dir.display()))?;
    info!(
        projects_dir = %projects_dir.display(),
        files = scan.files_read,
        with_tool_use = scan.source_count(),
        "Loaded audit input"
    );

    Ok(AuditInput {
        settings,
        scan,
        options: ReportOptions::new(args.days, Local::now().date_naive()),
    })
}

#[instrument(level = Level::TRACE)]
fn run_tools(args: &AuditArgs) -> Result<()> {
    let input = load_input(args)?;
    let report = generate_report(
        &input.scan.observations,
        &input.settings.permissions,
        &PatternExtractor::from_env(),
        &input.options,
    );
    emit(args.format, &report, |report, out| render::render_report(report, out))
}

#[instrument(level = Level::TRACE)]
fn run_fetch(args: &AuditArgs) -> Result<()> {
    let input = load_input(args)?;
    let report = generate_fetch_report(
        &input.scan.observations,
        &input.settings.permissions.allow,
        input.settings.sandbox_allowed_domains(),
        &input.options,
    );
    emit(args.format, &report, |report, out| {
        render::render_fetch_report(report, out)
    })
}

/// Writes `report` to stdout as pretty JSON or through `render`.
fn emit<T: Serialize>(
    format: OutputFormat,
    report: &T,
    render: impl FnOnce(&T, &mut io::StdoutLock<'static>) -> io::Result<()>,
) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report).context("failed to write report")?;
            writeln!(out)?;
        }
        OutputFormat::Text => render(report, &mut out).context("failed to write report")?,
    }
    out.flush()?;
    Ok(())
}
