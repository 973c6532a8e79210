//! Audit a page fixture's translation markup.
//!
//! Usage:
//!   audit <document.json> [--catalog copy.json]
//!
//! Prints the report as JSON and fails when it has errors.

use anyhow::{bail, Context, Result};
use lang_switch::config::Config;
use lang_switch::dom::MemoryDocument;
use lang_switch::i18n::{CopyCatalog, DocumentAudit};
use std::fs;
use std::io::Write;
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("audit=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = args
        .first()
        .context("Usage: audit <document.json> [--catalog copy.json]")?;
    let catalog_path = args
        .iter()
        .position(|arg| arg == "--catalog")
        .and_then(|i| args.get(i + 1));

    let config = Config::from_env()?;
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read document {}", path))?;
    let mut document = MemoryDocument::from_json(&content).context("Failed to parse document")?;

    if let Some(catalog_path) = catalog_path {
        let json = fs::read_to_string(catalog_path)
            .with_context(|| format!("Failed to read catalog {}", catalog_path))?;
        CopyCatalog::from_json(&json)
            .context("Failed to parse catalog")?
            .annotate(&mut document, &config.settings);
    }

    let report = DocumentAudit::audit(&document, &config.settings);
    info!(
        "Audit finished: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    std::io::stdout().flush()?;

    if report.has_errors() {
        bail!("Audit found {} errors", report.errors.len());
    }
    Ok(())
}
