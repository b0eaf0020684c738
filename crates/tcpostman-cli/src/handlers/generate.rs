//! Generate command handler

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use chrono::Local;
use serde::Serialize;
use tcpostman_core::{generate_collection, CollectionStats};
use tracing::{debug, info, instrument};

/// Result of a generate run, printed in machine-readable formats
#[derive(Debug, Serialize)]
struct GenerateSummary {
    output: String,
    include_internal: bool,
    requests: usize,
    stats: CollectionStats,
    elapsed_ms: u64,
}

/// Handle the generate command
#[instrument(skip(config, output), fields(structure = %args.structure.display()))]
pub async fn handle_generate(args: GenerateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("generate", &args.structure.display().to_string());

    let include_internal = args.include_internal || config.include_internal;
    let pretty = args.pretty_override().unwrap_or(config.output.pretty);
    let options = config.generation_options(Local::now().naive_local(), include_internal)?;

    output.info(&format!("Reading structure: {}", args.structure.display()))?;
    let spinner = output.spinner("Reading structure...");

    let tree = super::load_tree(&args.structure)?;
    debug!(templates = tree.entries().count(), "Structure loaded");

    spinner.set_message("Building collection...");
    let generated = generate_collection(&tree, &options)?;
    let json = generated.collection.to_json(pretty)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&args.output, json.as_bytes()).await?;

    drop(spinner);

    let requests = generated.collection.requests().len();
    info!(
        output = %args.output.display(),
        requests,
        bytes = json.len(),
        "Collection written"
    );

    let summary = GenerateSummary {
        output: args.output.display().to_string(),
        include_internal,
        requests,
        stats: generated.stats,
        elapsed_ms: timer.elapsed().as_millis() as u64,
    };

    if !output.is_human() {
        return output.data(&summary);
    }

    if summary.requests == 0 {
        output.warning("No operations found; check that the file is the service structure.js")?;
    }

    let internal = if include_internal {
        "including Internal"
    } else {
        "Internal excluded"
    };
    output.success(&format!(
        "✓ Collection written: {} ({} requests, {})",
        summary.output, summary.requests, internal
    ))?;

    if output.is_verbose() {
        output.table(
            &["Templates", "Libraries", "Internal libraries", "Services", "Operations"],
            vec![vec![
                summary.stats.templates.to_string(),
                summary.stats.libraries.to_string(),
                summary.stats.internal_libraries.to_string(),
                summary.stats.services.to_string(),
                summary.stats.operations.to_string(),
            ]],
        )?;
    }

    Ok(())
}
