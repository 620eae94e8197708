use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context as _;
use colored::Colorize;
use ocfl_validate::{InventoryValidator, Severity, ValidateConfig, ValidationLogger};
use serde_json::{json, Value};
use tracing::info;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.validate_config()?;
    match &cli.command {
        Command::Validate(args) => cmd_validate(args, &config, &cli.format),
        Command::Show(args) => cmd_show(args, &config, &cli.format),
    }
}

fn read_inventory(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading inventory {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing inventory {}", path.display()))
}

fn validate_file(
    path: &Path,
    config: &ValidateConfig,
    log: &mut ValidationLogger,
) -> anyhow::Result<(Value, InventoryValidator)> {
    let inventory = read_inventory(path)?;
    let mut validator = InventoryValidator::with_config(path.display().to_string(), config);
    validator.validate(&inventory, log);
    Ok((inventory, validator))
}

fn cmd_validate(
    args: &ValidateArgs,
    config: &ValidateConfig,
    format: &OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut log = ValidationLogger::new(config)?;
    let mut prior: Option<InventoryValidator> = None;
    for path in &args.inventories {
        let (_, validator) = validate_file(path, config, &mut log)?;
        if let Some(prior) = &prior {
            validator.validate_as_prior_version(prior, &mut log);
        }
        info!(
            inventory = %path.display(),
            head = validator.head().unwrap_or("-"),
            errors = log.error_count(),
            "inventory checked"
        );
        prior = Some(validator);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&log.report())?),
        OutputFormat::Text => print_report(&log),
    }
    Ok(exit_status(&log))
}

fn cmd_show(args: &ShowArgs, config: &ValidateConfig, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let mut log = ValidationLogger::new(config)?;
    let (inventory, validator) = validate_file(&args.inventory, config, &mut log)?;
    let id = inventory.get("id").and_then(Value::as_str).unwrap_or("?");

    match format {
        OutputFormat::Json => {
            let versions: Vec<Value> = validator
                .all_versions()
                .iter()
                .map(|v| {
                    let record = validator.version(v);
                    json!({
                        "version": v,
                        "created": record.and_then(|r| r.created.clone()),
                        "message": record.and_then(|r| r.message.clone()),
                        "files": validator.file_map(v),
                    })
                })
                .collect();
            let out = json!({
                "id": id,
                "digestAlgorithm": validator.digest_algorithm(),
                "contentDirectory": validator.content_directory(),
                "head": validator.head(),
                "versions": versions,
                "report": log.report(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("Object {}", id.bold());
            println!(
                "  Digest: {}  Content: {}  Head: {}",
                validator.digest_algorithm().to_string().cyan(),
                validator.content_directory(),
                validator.head().unwrap_or("-").yellow()
            );
            if let Some(scheme) = validator.version_scheme() {
                println!("  Versions: {} ({scheme})", validator.all_versions().len());
            }
            for v in validator.all_versions() {
                let record = validator.version(v);
                let created = record
                    .and_then(|r| r.created.as_ref())
                    .and_then(Value::as_str)
                    .unwrap_or("?");
                let message = record
                    .and_then(|r| r.message.as_ref())
                    .and_then(Value::as_str)
                    .unwrap_or("");
                println!("{}  {}  {}", v.yellow().bold(), created.dimmed(), message);
                for (file, digest) in validator.file_map(v) {
                    println!("    {}  {}", short_digest(&digest).dimmed(), file);
                }
            }
            println!();
            print_report(&log);
        }
    }
    Ok(exit_status(&log))
}

fn short_digest(digest: &str) -> &str {
    digest.get(..8).unwrap_or(digest)
}

fn print_report(log: &ValidationLogger) {
    let report = log.report();
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            Severity::Error => println!("{}", diagnostic.message.red()),
            Severity::Warning => println!("{}", diagnostic.message.yellow()),
        }
    }
    let counts = format!("{} errors, {} warnings", report.errors, report.warnings);
    if report.valid {
        println!("{} Inventory valid ({counts})", "✓".green().bold());
    } else {
        println!("{} Inventory invalid ({counts})", "✗".red().bold());
    }
}

fn exit_status(log: &ValidationLogger) -> ExitCode {
    if log.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
