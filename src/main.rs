//! Render a page fixture in the stored (or a newly selected) language.
//!
//! Usage:
//!   lang-switch <document.json>                       # Render the stored preference
//!   lang-switch <document.json> --select ar           # Click the Arabic switch control
//!   lang-switch <document.json> --catalog copy.json   # Stamp catalog copy first
//!
//! Optional environment variables:
//! - LANG_SWITCH_STATE_FILE (defaults to .lang-switch/preferences.json)
//! - LANG_SWITCH_STORAGE_KEY (defaults to autodrive-preferred-language)
//! - LANG_SWITCH_CLASS / LANG_SWITCH_ACTIVE_CLASS

use anyhow::{bail, Context, Result};
use lang_switch::config::Config;
use lang_switch::dom::{DocumentView, MemoryDocument};
use lang_switch::events::MemoryEvents;
use lang_switch::i18n::{CopyCatalog, Language};
use lang_switch::storage::FileStore;
use lang_switch::{initialize, LanguageSwitcher};
use std::fs;
use tracing::{info, warn};

struct Args {
    document: String,
    select: Option<String>,
    catalog: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut document = None;
    let mut select = None;
    let mut catalog = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--select" => select = Some(args.next().context("--select needs a language code")?),
            "--catalog" => catalog = Some(args.next().context("--catalog needs a path")?),
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            path => document = Some(path.to_string()),
        }
    }

    Ok(Args {
        document: document.context("Usage: lang-switch <document.json> [--select <code>] [--catalog <copy.json>]")?,
        select,
        catalog,
    })
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the rendered document
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lang_switch=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;

    let content = fs::read_to_string(&args.document)
        .with_context(|| format!("Failed to read document {}", args.document))?;
    let mut document = MemoryDocument::from_json(&content).context("Failed to parse document")?;

    if let Some(path) = &args.catalog {
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read catalog {}", path))?;
        let catalog = CopyCatalog::from_json(&json).context("Failed to parse catalog")?;
        let annotated = catalog.annotate(&mut document, &config.settings);
        info!("Annotated {} nodes from {} catalog entries", annotated, catalog.len());
    }

    info!("Using preference file {}", config.state_file.display());
    let store = FileStore::new(&config.state_file);
    match store.updated_at(&config.settings.storage_key) {
        Ok(Some(at)) => info!("Preference last saved {}", at.to_rfc3339()),
        Ok(None) => info!("No saved preference yet"),
        Err(e) => warn!("Preference file unreadable: {}", e),
    }
    let switcher = LanguageSwitcher::new(document, store, config.settings.clone());

    let mut events = MemoryEvents::new();
    let shared = initialize(switcher, &mut events);

    if let Some(code) = &args.select {
        if let Err(e) = Language::from_code(code) {
            warn!("{}; the page will render in English", e);
        }

        let control = {
            let switcher = shared.borrow();
            let found = switcher.controls().into_iter().find(|node| {
                switcher
                    .document()
                    .attribute(node, &config.settings.switch_lang_attr)
                    .as_deref()
                    == Some(code.as_str())
            });
            found
        };

        match control {
            Some(node) => {
                events.click(&node);
            }
            None => {
                warn!("No switch control for '{}', selecting it directly", code);
                shared.borrow_mut().select(code);
            }
        }
    }

    let switcher = shared.borrow();
    let report = switcher.metrics().report();
    let active = switcher.active_language();
    info!(
        "Rendered {} ({}): {} text updates, {} skipped, {} placeholders",
        active.name(),
        active.native_name(),
        report.text_updates,
        report.text_skips,
        report.placeholder_updates
    );

    println!("{}", switcher.document().to_json_pretty()?);
    Ok(())
}
