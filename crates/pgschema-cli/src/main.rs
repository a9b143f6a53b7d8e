mod logging;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pgschema_core::{Diagnostic, RegistryBuild, build_registry, validate};
use pgschema_generate::{GenerationError, synthesize_dataset};
use thiserror::Error;
use workspace::{Settings, WorkspaceError, load_documents, load_settings, write_dataset};

#[derive(Debug, Error)]
enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "pgschema", version, about = "x-pg schema fixtures and lint")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize one sample row per table.
    Generate(GenerateArgs),
    /// Check relational constraints across the schema corpus.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Directory scanned recursively for schema documents.
    #[arg(long, value_name = "DIR")]
    schemas: Option<PathBuf>,
    /// Output path for the sample dataset.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Directory scanned recursively for schema documents.
    #[arg(long, value_name = "DIR")]
    schemas: Option<PathBuf>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json).map_err(CliError::Logging)?;

    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Command::Generate(args) => run_generate(settings.with_overrides(args.schemas, args.out)),
        Command::Validate(args) => {
            run_validate(settings.with_overrides(args.schemas, None), args.format)
        }
    }
}

fn load_registry(settings: &Settings) -> Result<RegistryBuild, CliError> {
    let documents = load_documents(&settings.schemas_dir)?;
    tracing::info!(
        event = "documents_loaded",
        schemas_dir = %settings.schemas_dir.display(),
        documents = documents.len()
    );
    let build = build_registry(documents);
    tracing::info!(event = "registry_built", tables = build.registry.len());
    Ok(build)
}

fn run_generate(settings: Settings) -> Result<ExitCode, CliError> {
    let timer = Instant::now();
    let build = load_registry(&settings)?;
    for diagnostic in &build.diagnostics {
        tracing::warn!(event = "document_skipped", code = diagnostic.kind.code(), "{diagnostic}");
    }

    let dataset = synthesize_dataset(&build.registry);
    let rendered = dataset.to_json_string()?;
    write_dataset(&settings.output, &rendered)?;
    tracing::info!(
        event = "dataset_written",
        path = %settings.output.display(),
        duration_ms = timer.elapsed().as_millis()
    );

    println!(
        "Generated sample data for {} tables at {}",
        dataset.len(),
        settings.output.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_validate(settings: Settings, format: ReportFormat) -> Result<ExitCode, CliError> {
    let RegistryBuild {
        registry,
        mut diagnostics,
    } = load_registry(&settings)?;
    diagnostics.extend(validate(&registry));
    tracing::info!(event = "validation_finished", diagnostics = diagnostics.len());

    match format {
        ReportFormat::Text => print_text_report(&diagnostics),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&diagnostics)?),
    }

    if diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_text_report(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("All schemas passed validation.");
        return;
    }
    eprintln!("Schema validation failed with the following issues:");
    for diagnostic in diagnostics {
        eprintln!(" - {diagnostic}");
    }
}
